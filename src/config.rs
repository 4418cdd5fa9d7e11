//! Immutable configuration record, resolved once from the CLI and shared
//! read-only by every other component (§4.1).

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::errors::{KernelError, KernelResult};

/// Which connections a brain actually writes to a sink during one
/// iteration (§4.4).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum NeuralUpdateType {
    /// Every connection writes.
    Every,
    /// Only connections whose magnitude clears `neural_threshold` write.
    Threshold,
    /// Only the single largest-magnitude connection writes.
    Max,
}

/// Brain topology construction strategy (§4.5).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum NeuralBrainType {
    /// Direct source -> sink connections, no memory layer.
    NoMemory,
    /// Source -> memory layers -> sink, layer by layer.
    Layered,
    /// Every source/memory/sink pair that the ordering rule in §4.5 allows.
    FullyConnected,
}

/// The historical default source registry (§4.1, minus the commented-out
/// goal/out-of-bounds sources — see `original_source/src/sources.h`).
pub const DEFAULT_SOURCES: &[&str] = &[
    "west", "east", "north", "south", "velocity", "red", "green", "blue", "size",
];

/// The historical default sink registry.
pub const DEFAULT_SINKS: &[&str] = &["velocity", "move", "direction"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub seed: u64,
    pub numboids: usize,

    pub mutation: f64,
    pub neural_threshold: f64,

    pub num_memory_per_layer: usize,
    pub num_memory_layers: usize,

    pub neuron_sources: Vec<String>,
    pub neuron_sinks: Vec<String>,

    pub neural_update_type: NeuralUpdateType,
    pub neural_brain_type: NeuralBrainType,

    pub bounded_weights: bool,
    pub max_weight: f64,

    pub min_size: f64,
    pub max_size: f64,
    pub max_velocity: f64,
    pub max_angular_velocity: f64,

    pub screen_width: f64,
    pub screen_height: f64,

    pub max_gens: u64,
    pub gen_iters: u64,
    pub realtime_every_ngens: u64,

    pub zoom: f64,
    pub save_frames: bool,
    pub video_scale: f64,
}

impl Default for Config {
    /// Defaults recovered from `original_source/src/config.h`, where
    /// spec.md itself is silent on concrete numbers (see SPEC_FULL.md §4.1).
    fn default() -> Self {
        Config {
            seed: 0,
            numboids: 5000,
            mutation: 0.0012,
            neural_threshold: 0.12,
            num_memory_per_layer: 5,
            num_memory_layers: 3,
            neuron_sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            neuron_sinks: DEFAULT_SINKS.iter().map(|s| s.to_string()).collect(),
            neural_update_type: NeuralUpdateType::Every,
            neural_brain_type: NeuralBrainType::NoMemory,
            bounded_weights: true,
            max_weight: 2.0,
            min_size: 5.0,
            max_size: 20.0,
            max_velocity: 18.0,
            // No historical constant for this axis; chosen so a boid can
            // turn at most 1/8 turn per iteration (SPEC_FULL.md §4.1).
            max_angular_velocity: std::f64::consts::TAU / 8.0,
            screen_width: 750.0,
            screen_height: 750.0,
            max_gens: 12000,
            gen_iters: 350,
            realtime_every_ngens: 25,
            zoom: 0.85,
            save_frames: false,
            video_scale: 1.0,
        }
    }
}

impl Config {
    /// Validates the record and resolves the neuron name lists against the
    /// empty-list-falls-back-to-default rule in §4.1. Unknown names are
    /// resolved later, against the registries (§4.1: "unknown names are
    /// dropped"), not here.
    pub fn validate(mut self) -> KernelResult<Self> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(KernelError::InvalidConfig(
                "screen_width and screen_height must be positive".into(),
            ));
        }
        if self.min_size <= 0.0 || self.max_size < self.min_size {
            return Err(KernelError::InvalidConfig(
                "min_size must be positive and max_size must be >= min_size".into(),
            ));
        }
        if self.numboids == 0 {
            return Err(KernelError::EmptyPopulation);
        }

        if self.neuron_sources.is_empty() {
            self.neuron_sources = DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect();
        }
        if self.neuron_sinks.is_empty() {
            self.neuron_sinks = DEFAULT_SINKS.iter().map(|s| s.to_string()).collect();
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn zero_population_is_rejected() {
        let mut cfg = Config::default();
        cfg.numboids = 0;
        assert!(matches!(cfg.validate(), Err(KernelError::EmptyPopulation)));
    }

    #[test]
    fn empty_neuron_lists_fall_back_to_defaults() {
        let mut cfg = Config::default();
        cfg.neuron_sources = vec![];
        cfg.neuron_sinks = vec![];
        let cfg = cfg.validate().unwrap();
        assert_eq!(cfg.neuron_sources, DEFAULT_SOURCES);
        assert_eq!(cfg.neuron_sinks, DEFAULT_SINKS);
    }
}
