//! A population member that owns a brain and a memory pool on top of its
//! physical `Agent` state (§2 component 7).

use crate::agent::Agent;
use crate::brain::{Brain, ReadEnd, WriteEnd};
use crate::config::{Config, NeuralUpdateType};
use crate::conditions::Predicate;
use crate::neuron::{Memory, Sink, SinkKind, Source, SourceKind};
use crate::rng::GlobalRng;

pub struct NeuralAgent {
    pub agent: Agent,
    brain: Brain,
    sources: Vec<Source>,
    sinks: Vec<Sink>,
    memory: Vec<Memory>,
}

impl NeuralAgent {
    /// Builds a genuinely fresh agent: random physical state and random
    /// bipolar brain weights over a topology constructed from the resolved
    /// source/sink registries (§4.5 preconditions;
    /// `original_source/src/main.cpp::InitPopulation`). Used for the
    /// population-initial build and for the zero-survivors re-init branch
    /// of the evolution step — the only two places the original
    /// re-invokes `InitPopulation`.
    pub fn new(cfg: &Config, rng: &mut GlobalRng) -> Self {
        let source_kinds = crate::registry::resolve_sources(&cfg.neuron_sources);
        let sink_kinds = crate::registry::resolve_sinks(&cfg.neuron_sinks);
        let mut na = Self::bare(cfg, &source_kinds, &sink_kinds);
        na.agent.randomize_physical(cfg, rng);
        na.brain.randomize_weights(rng);
        na
    }

    /// Builds the brain/sources/sinks/memory shape with placeholder
    /// physical state and all-zero weights, drawing no randomness. For
    /// callers that are about to overwrite both (reproduction) or want to
    /// randomise them explicitly (`new`), so neither path wastes an RNG
    /// draw on a value it immediately discards.
    fn bare(cfg: &Config, source_kinds: &[SourceKind], sink_kinds: &[SinkKind]) -> Self {
        let agent = Agent::bare(cfg);
        let brain = Brain::build(cfg, source_kinds.len(), sink_kinds.len());
        let memory_count = cfg.num_memory_layers * cfg.num_memory_per_layer;
        NeuralAgent {
            agent,
            brain,
            sources: source_kinds.iter().copied().map(Source::new).collect(),
            sinks: sink_kinds.iter().copied().map(Sink::new).collect(),
            memory: vec![Memory::default(); memory_count],
        }
    }

    pub fn brain(&self) -> &Brain {
        &self.brain
    }

    pub fn brain_mut(&mut self) -> &mut Brain {
        &mut self.brain
    }

    /// Builds an offspring with a freshly constructed (but isomorphic)
    /// brain topology, then copies the parent's weights and weight-deltas
    /// connection-by-connection (§4.7 step 2). Neither physical state nor
    /// brain weights are randomised here — both are about to be
    /// overwritten (physical state by the caller's `randomize_physical`
    /// per step 3, weights by the copy below), so `bare` is used instead
    /// of `new` to avoid burning RNG draws on values that never survive.
    pub fn reproduce_from(parent: &NeuralAgent, cfg: &Config) -> Self {
        let source_kinds: Vec<SourceKind> = parent.sources.iter().map(|s| s.kind()).collect();
        let sink_kinds: Vec<SinkKind> = parent.sinks.iter().map(|s| s.kind()).collect();
        let mut child = Self::bare(cfg, &source_kinds, &sink_kinds);

        debug_assert_eq!(child.brain.len(), parent.brain.len());
        for i in 0..parent.brain.len() {
            child.brain.set_weight(i, parent.brain.weight(i));
            if parent.brain.weight_delta(i) < 0.0 {
                child.brain.flip_weight_delta(i);
            }
        }
        child
    }

    /// One simulation iteration (§4.4): set age, reset sources/sinks
    /// referenced by the brain, evaluate per the configured discipline,
    /// then apply every sink once.
    pub fn update(&mut self, cfg: &Config, predicate: &Predicate, iter: u64) {
        self.agent.age = iter;

        for sink in &mut self.sinks {
            sink.reset();
        }
        for mem in &mut self.memory {
            mem.reset();
        }

        let goal_reached = predicate.eval(&self.agent, cfg);

        match cfg.neural_update_type {
            NeuralUpdateType::Every => self.update_every(cfg, goal_reached),
            NeuralUpdateType::Threshold => self.update_threshold(cfg, goal_reached),
            NeuralUpdateType::Max => self.update_max(cfg, goal_reached),
        }

        for c in self.brain.connections() {
            if let WriteEnd::Sink(idx) = c.snk {
                self.sinks[idx].apply(&mut self.agent);
            }
        }
    }

    fn read(&self, end: ReadEnd, cfg: &Config, goal_reached: bool) -> f64 {
        match end {
            ReadEnd::Source(idx) => self.sources[idx].read(&self.agent, cfg, goal_reached),
            ReadEnd::Memory(idx) => self.memory[idx].read(),
        }
    }

    fn write(&mut self, end: WriteEnd, value: f64) {
        match end {
            WriteEnd::Sink(idx) => self.sinks[idx].write(value),
            WriteEnd::Memory(idx) => self.memory[idx].write(value),
        }
    }

    fn update_every(&mut self, cfg: &Config, goal_reached: bool) {
        for i in 0..self.brain.len() {
            let c = self.brain.connections()[i];
            let v = self.read(c.src, cfg, goal_reached) * self.brain.weight(i);
            self.write(c.snk, v);
        }
    }

    fn update_threshold(&mut self, cfg: &Config, goal_reached: bool) {
        for i in 0..self.brain.len() {
            let c = self.brain.connections()[i];
            let v = self.read(c.src, cfg, goal_reached) * self.brain.weight(i);
            if v.abs() > cfg.neural_threshold {
                self.write(c.snk, v);
            }
        }
    }

    fn update_max(&mut self, cfg: &Config, goal_reached: bool) {
        let mut best_idx = None;
        let mut best_mag = f64::NEG_INFINITY;
        for i in 0..self.brain.len() {
            let c = self.brain.connections()[i];
            let v = self.read(c.src, cfg, goal_reached) * self.brain.weight(i);
            if v.abs() > best_mag {
                best_mag = v.abs();
                best_idx = Some(i);
            }
        }
        if let Some(i) = best_idx {
            let c = self.brain.connections()[i];
            let w = self.brain.weight(i);
            self.write(c.snk, w);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, NeuralBrainType, NeuralUpdateType};
    use crate::conditions::DEFAULT_SURVIVAL;

    fn single_source_sink_cfg() -> Config {
        let mut cfg = Config::default();
        cfg.neuron_sources = vec!["west".into()];
        cfg.neuron_sinks = vec!["velocity".into()];
        cfg.neural_brain_type = NeuralBrainType::NoMemory;
        cfg.neural_update_type = NeuralUpdateType::Every;
        cfg
    }

    #[test]
    fn every_discipline_scenario_d() {
        // Scenario D: constant source 0.5, weight 2.0, sink velocity on an
        // agent with velocity 0 -> velocity = sigmoid(1.0). The "west"
        // source reads exactly 0.5 when the agent sits at mid-screen.
        let cfg = single_source_sink_cfg();
        let mut rng = GlobalRng::from_seed(1);
        let mut na = NeuralAgent::new(&cfg, &mut rng);
        na.agent.set_velocity(0.0);
        na.agent
            .set_position(crate::agent::Position { x: cfg.screen_width / 2.0, y: 0.0 });
        na.brain_mut().set_weight(0, 2.0);

        na.update(&cfg, &crate::conditions::DEFAULT_SURVIVAL, 0);

        let expected = crate::neuron::sigmoid(1.0);
        assert!((na.agent.velocity() - expected).abs() < 1e-9);
    }

    #[test]
    fn reproduction_with_zero_mutation_preserves_weights() {
        let cfg = single_source_sink_cfg();
        let mut rng = GlobalRng::from_seed(2);
        let mut parent = NeuralAgent::new(&cfg, &mut rng);
        for i in 0..parent.brain().len() {
            parent.brain_mut().set_weight(i, (i as f64 + 1.0) * 0.25);
        }
        let child = NeuralAgent::reproduce_from(&parent, &cfg);
        assert_eq!(child.brain().len(), parent.brain().len());
        for i in 0..parent.brain().len() {
            assert_eq!(child.brain().weight(i), parent.brain().weight(i));
        }
    }

    #[test]
    fn update_runs_without_panicking_for_every_discipline() {
        let mut cfg = Config::default();
        cfg.neural_update_type = NeuralUpdateType::Every;
        let mut rng = GlobalRng::from_seed(3);
        let mut na = NeuralAgent::new(&cfg, &mut rng);
        na.update(&cfg, &DEFAULT_SURVIVAL, 0);
    }

    #[test]
    fn update_runs_for_threshold_and_max_disciplines() {
        for disc in [NeuralUpdateType::Threshold, NeuralUpdateType::Max] {
            let mut cfg = Config::default();
            cfg.neural_update_type = disc;
            let mut rng = GlobalRng::from_seed(4);
            let mut na = NeuralAgent::new(&cfg, &mut rng);
            na.update(&cfg, &DEFAULT_SURVIVAL, 0);
        }
    }
}
