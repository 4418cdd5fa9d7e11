//! Brain connections and topology construction (§3 "Brain connection",
//! §4.5).
//!
//! A connection's two ends are typed so that the "sinks are never read,
//! sources are never written" rule from §4.3 is enforced by the compiler
//! rather than by convention: a `ReadEnd` can only be a source or a memory
//! neuron, a `WriteEnd` can only be a sink or a memory neuron.
//!
//! Per the "brain as indices, not pointers" design note (§9), an end is
//! just an index into the owning agent's own source/sink/memory arenas —
//! two agents' brains are isomorphic in shape but never share neuron
//! state.

use crate::config::{Config, NeuralBrainType};
use crate::rng::GlobalRng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReadEnd {
    Source(usize),
    Memory(usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WriteEnd {
    Sink(usize),
    Memory(usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub src: ReadEnd,
    pub snk: WriteEnd,
}

/// An ordered brain: connection endpoints, plus weight and weight-delta in
/// parallel vectors (cache-friendly, and convenient for SIMD-ish mutation
/// sweeps — §9).
#[derive(Clone, Debug)]
pub struct Brain {
    connections: Vec<Connection>,
    weights: Vec<f64>,
    /// Sign of the next mutation step for each connection, `+1.0` or
    /// `-1.0` (§3). Carried across generations alongside the weight it
    /// belongs to, so the evolutionary search keeps a direction rather
    /// than re-rolling it from scratch every generation.
    weight_deltas: Vec<f64>,
}

impl Brain {
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn weight(&self, i: usize) -> f64 {
        self.weights[i]
    }

    pub fn set_weight(&mut self, i: usize, w: f64) {
        self.weights[i] = w;
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn weight_delta(&self, i: usize) -> f64 {
        self.weight_deltas[i]
    }

    pub fn flip_weight_delta(&mut self, i: usize) {
        self.weight_deltas[i] = -self.weight_deltas[i];
    }

    /// Draws a fresh bipolar weight for every connection, `[-1, 1)`
    /// (`original_source/src/main.cpp::InitPopulation`'s `bipolarrandf()`
    /// sweep over a freshly built brain). Only the population-initial and
    /// zero-survivor re-init paths call this; reproduction instead copies
    /// weights from the parent connection-by-connection.
    pub fn randomize_weights(&mut self, rng: &mut GlobalRng) {
        for w in &mut self.weights {
            *w = rng.bi_uniform();
        }
    }

    /// Builds a brain of the configured topology for `num_sources` sources
    /// and `num_sinks` sinks, over `num_memory_layers *
    /// num_memory_per_layer` memory neurons. All weights start at `0.0`
    /// and all weight-deltas start at `+1.0` (§3) — callers that want a
    /// genuinely fresh brain follow this with `randomize_weights`.
    pub fn build(cfg: &Config, num_sources: usize, num_sinks: usize) -> Brain {
        let connections = match cfg.neural_brain_type {
            NeuralBrainType::NoMemory => no_memory(num_sources, num_sinks),
            NeuralBrainType::Layered => {
                layered(num_sources, num_sinks, cfg.num_memory_layers, cfg.num_memory_per_layer)
            }
            NeuralBrainType::FullyConnected => fully_connected(
                num_sources,
                num_sinks,
                cfg.num_memory_layers,
                cfg.num_memory_per_layer,
            ),
        };
        let n = connections.len();
        Brain {
            connections,
            weights: vec![0.0; n],
            weight_deltas: vec![1.0; n],
        }
    }

    /// The deterministic connection count for fixed (sources, sinks,
    /// memory shape, topology) — Testable Property 2.
    pub fn expected_len(cfg: &Config, num_sources: usize, num_sinks: usize) -> usize {
        let l = cfg.num_memory_layers;
        let k = cfg.num_memory_per_layer;
        match cfg.neural_brain_type {
            NeuralBrainType::NoMemory => num_sources * num_sinks,
            NeuralBrainType::Layered => num_sources * k + (l.saturating_sub(1)) * k * k + k * num_sinks,
            NeuralBrainType::FullyConnected => {
                let memory = l * k;
                num_sources * num_sinks + num_sources * memory + memory * memory + memory * num_sinks
            }
        }
    }
}

fn no_memory(num_sources: usize, num_sinks: usize) -> Vec<Connection> {
    let mut out = Vec::with_capacity(num_sources * num_sinks);
    for s in 0..num_sources {
        for k in 0..num_sinks {
            out.push(Connection {
                src: ReadEnd::Source(s),
                snk: WriteEnd::Sink(k),
            });
        }
    }
    out
}

fn layered(num_sources: usize, num_sinks: usize, layers: usize, per_layer: usize) -> Vec<Connection> {
    let mut out = Vec::new();
    if layers == 0 || per_layer == 0 {
        return out;
    }

    // 1. every source x first-layer memory neuron.
    for s in 0..num_sources {
        for m in 0..per_layer {
            out.push(Connection {
                src: ReadEnd::Source(s),
                snk: WriteEnd::Memory(m),
            });
        }
    }

    // 2. every inter-layer gap: layer w x layer w+1.
    for w in 0..layers.saturating_sub(1) {
        let layer_w = w * per_layer;
        let layer_w1 = (w + 1) * per_layer;
        for a in 0..per_layer {
            for b in 0..per_layer {
                out.push(Connection {
                    src: ReadEnd::Memory(layer_w + a),
                    snk: WriteEnd::Memory(layer_w1 + b),
                });
            }
        }
    }

    // 3. every last-layer memory neuron x every sink.
    let last_layer = (layers - 1) * per_layer;
    for m in 0..per_layer {
        for k in 0..num_sinks {
            out.push(Connection {
                src: ReadEnd::Memory(last_layer + m),
                snk: WriteEnd::Sink(k),
            });
        }
    }

    out
}

fn fully_connected(num_sources: usize, num_sinks: usize, layers: usize, per_layer: usize) -> Vec<Connection> {
    let memory_count = layers * per_layer;
    let mut out = Vec::new();

    // 1. every source: (a) source x sink, (b) source x memory.
    for s in 0..num_sources {
        for k in 0..num_sinks {
            out.push(Connection {
                src: ReadEnd::Source(s),
                snk: WriteEnd::Sink(k),
            });
        }
        for m in 0..memory_count {
            out.push(Connection {
                src: ReadEnd::Source(s),
                snk: WriteEnd::Memory(m),
            });
        }
    }

    // 2. every memory x every memory (writes before any of the reads in
    // step 3 — the ordering invariant in §4.5).
    for a in 0..memory_count {
        for b in 0..memory_count {
            out.push(Connection {
                src: ReadEnd::Memory(a),
                snk: WriteEnd::Memory(b),
            });
        }
    }

    // 3. every memory x every sink.
    for m in 0..memory_count {
        for k in 0..num_sinks {
            out.push(Connection {
                src: ReadEnd::Memory(m),
                snk: WriteEnd::Sink(k),
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, NeuralBrainType};

    fn cfg_with(brain_type: NeuralBrainType, layers: usize, per_layer: usize) -> Config {
        let mut cfg = Config::default();
        cfg.neural_brain_type = brain_type;
        cfg.num_memory_layers = layers;
        cfg.num_memory_per_layer = per_layer;
        cfg
    }

    #[test]
    fn no_memory_brain_count_matches_scenario_b() {
        // Scenario B: |sources|=2, |sinks|=2, NO_MEMORY -> 4 connections.
        let cfg = cfg_with(NeuralBrainType::NoMemory, 3, 5);
        let brain = Brain::build(&cfg, 2, 2);
        assert_eq!(brain.len(), 4);
        assert_eq!(Brain::expected_len(&cfg, 2, 2), 4);
    }

    #[test]
    fn layered_brain_count_matches_scenario_c() {
        // Scenario C: |S|=3, |K|=2, L=2, memory-per-layer=4 -> 36
        // connections, 8 memory neurons.
        let cfg = cfg_with(NeuralBrainType::Layered, 2, 4);
        let brain = Brain::build(&cfg, 3, 2);
        assert_eq!(brain.len(), 36);
        assert_eq!(Brain::expected_len(&cfg, 3, 2), 36);
    }

    #[test]
    fn fully_connected_writes_precede_reads() {
        let cfg = cfg_with(NeuralBrainType::FullyConnected, 2, 3);
        let brain = Brain::build(&cfg, 2, 2);
        assert_eq!(brain.len(), Brain::expected_len(&cfg, 2, 2));

        // Every Memory-writing connection whose source is a memory index
        // `m` must appear, for every `m`, before the first connection
        // that reads memory `m` as a sink target used downstream... the
        // concrete invariant we can check structurally: all
        // Memory<-Memory and Source->Memory connections come before any
        // Memory->Sink connection.
        let mut seen_memory_to_sink = false;
        for c in brain.connections() {
            if matches!(c.src, ReadEnd::Memory(_)) && matches!(c.snk, WriteEnd::Sink(_)) {
                seen_memory_to_sink = true;
            }
            if seen_memory_to_sink {
                assert!(
                    !matches!(c.snk, WriteEnd::Memory(_)),
                    "a memory write appears after memory->sink reads began"
                );
            }
        }
    }

    #[test]
    fn brain_lengths_are_deterministic_across_agents() {
        let cfg = cfg_with(NeuralBrainType::FullyConnected, 3, 5);
        let a = Brain::build(&cfg, 4, 3);
        let b = Brain::build(&cfg, 4, 3);
        assert_eq!(a.len(), b.len());
    }
}
