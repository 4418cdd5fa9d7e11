//! Binary composition root (§2, §6): parse the CLI, resolve and validate
//! configuration, seed the PRNG, and run the simulation to completion.

use anyhow::Context;
use clap::Parser;
use genboids::cli::Cli;
use genboids::conditions::DEFAULT_SURVIVAL;
use genboids::render::NullSink;
use genboids::rng::GlobalRng;
use genboids::{simulation, Config};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let cfg: Config = cli.into();
    let cfg = cfg.validate().context("invalid configuration")?;

    tracing::info!(numboids = cfg.numboids, max_gens = cfg.max_gens, "starting run");

    let mut rng = GlobalRng::from_seed(cfg.seed);
    let predicate = &DEFAULT_SURVIVAL;
    let mut frame_sink = NullSink;
    let mut video_sink = NullSink;

    simulation::run(&cfg, predicate, &mut rng, &mut frame_sink, &mut video_sink);

    tracing::info!("run complete");
    Ok(())
}
