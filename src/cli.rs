//! Command-line surface (§4.1, §6), mapped field-for-field onto `Config`.

use clap::Parser;

use crate::config::{Config, NeuralBrainType, NeuralUpdateType};

#[derive(Parser, Debug)]
#[command(name = "genboids", about = "Evolutionary simulator of neural-network-driven boids")]
pub struct Cli {
    /// PRNG seed for the whole run.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Number of agents in the population.
    #[arg(long, default_value_t = 5000)]
    pub numboids: usize,

    /// Mutation rate applied to every connection weight each generation.
    #[arg(long, default_value_t = 0.0012)]
    pub mutation: f64,

    /// Minimum |weighted input| required to write under THRESHOLD.
    #[arg(long, default_value_t = 0.12)]
    pub neural_threshold: f64,

    #[arg(long, default_value_t = 5)]
    pub num_memory_per_layer: usize,

    #[arg(long, default_value_t = 3)]
    pub num_memory_layers: usize,

    /// Comma-separated source neuron names; empty falls back to the default list.
    #[arg(long, value_delimiter = ',')]
    pub neuron_sources: Vec<String>,

    /// Comma-separated sink neuron names; empty falls back to the default list.
    #[arg(long, value_delimiter = ',')]
    pub neuron_sinks: Vec<String>,

    #[arg(long, value_enum, default_value_t = NeuralUpdateType::Every)]
    pub neural_update_type: NeuralUpdateType,

    #[arg(long, value_enum, default_value_t = NeuralBrainType::NoMemory)]
    pub neural_brain_type: NeuralBrainType,

    /// Clamp mutated weights to +/- max_weight. Pass `--bounded-weights
    /// false` to disable.
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    pub bounded_weights: bool,

    #[arg(long, default_value_t = 2.0)]
    pub max_weight: f64,

    #[arg(long, default_value_t = 5.0)]
    pub min_size: f64,

    #[arg(long, default_value_t = 20.0)]
    pub max_size: f64,

    #[arg(long, default_value_t = 18.0)]
    pub max_velocity: f64,

    #[arg(long, default_value_t = std::f64::consts::TAU / 8.0)]
    pub max_angular_velocity: f64,

    #[arg(long, default_value_t = 750.0)]
    pub screen_width: f64,

    #[arg(long, default_value_t = 750.0)]
    pub screen_height: f64,

    /// Number of generation boundaries to run before stopping.
    #[arg(long, default_value_t = 12000)]
    pub max_gens: u64,

    /// Number of per-agent update iterations within one generation.
    #[arg(long, default_value_t = 350)]
    pub gen_iters: u64,

    /// Render every Nth generation in real time; 0 disables real-time rendering.
    #[arg(long, default_value_t = 25)]
    pub realtime_every_ngens: u64,

    #[arg(long, default_value_t = 0.85)]
    pub zoom: f64,

    #[arg(long, default_value_t = false)]
    pub save_frames: bool,

    #[arg(long, default_value_t = 1.0)]
    pub video_scale: f64,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            seed: cli.seed,
            numboids: cli.numboids,
            mutation: cli.mutation,
            neural_threshold: cli.neural_threshold,
            num_memory_per_layer: cli.num_memory_per_layer,
            num_memory_layers: cli.num_memory_layers,
            neuron_sources: cli.neuron_sources,
            neuron_sinks: cli.neuron_sinks,
            neural_update_type: cli.neural_update_type,
            neural_brain_type: cli.neural_brain_type,
            bounded_weights: cli.bounded_weights,
            max_weight: cli.max_weight,
            min_size: cli.min_size,
            max_size: cli.max_size,
            max_velocity: cli.max_velocity,
            max_angular_velocity: cli.max_angular_velocity,
            screen_width: cli.screen_width,
            screen_height: cli.screen_height,
            max_gens: cli.max_gens,
            gen_iters: cli.gen_iters,
            realtime_every_ngens: cli.realtime_every_ngens,
            zoom: cli.zoom,
            save_frames: cli.save_frames,
            video_scale: cli.video_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_into_a_valid_config() {
        let cli = Cli::parse_from(["genboids"]);
        let cfg: Config = cli.into();
        assert!(cfg.validate().is_ok());
    }
}
