//! Output contracts for the simulation loop (§6): frame delivery and
//! end-of-run video assembly, kept as traits so `main.rs` can wire in a
//! real renderer without the kernel depending on any graphics crate.

use std::time::Duration;

use crate::agent::{Colour, Position};
use crate::conditions::error_function;
use crate::config::Config;
use crate::errors::KernelResult;
use crate::population::Population;

/// A read-only view of one agent, as handed to a `FrameSink`.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSnapshot {
    pub position: Position,
    pub direction: f64,
    pub size: f64,
    pub colour: Colour,
    pub error: f64,
}

/// An immutable snapshot of the whole population at one iteration,
/// decoupled from `NeuralAgent` so a `FrameSink` never touches brain
/// internals.
#[derive(Clone, Debug, Default)]
pub struct PopulationSnapshot {
    pub agents: Vec<AgentSnapshot>,
}

impl PopulationSnapshot {
    pub fn capture(pop: &Population, cfg: &Config) -> Self {
        let agents = pop
            .agents()
            .iter()
            .map(|na| AgentSnapshot {
                position: na.agent.position(),
                direction: na.agent.direction(),
                size: na.agent.size(),
                colour: na.agent.colour(),
                error: error_function(&na.agent, cfg),
            })
            .collect();
        PopulationSnapshot { agents }
    }
}

/// Aggregate statistics handed to the renderer alongside each frame (§6):
/// survivor count from the previous generation boundary plus this
/// iteration's error-metric spread across the population.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stats {
    pub generation: u64,
    pub population_size: usize,
    /// Number of survivors selected at the previous generation boundary.
    pub survivors: usize,
    pub error_min: f64,
    pub error_avg: f64,
    pub error_max: f64,
}

impl Stats {
    /// Computes the per-iteration error spread from a freshly captured
    /// snapshot (§6 "per-iteration error min/avg/max").
    pub fn compute(generation: u64, survivors: usize, snapshot: &PopulationSnapshot) -> Self {
        let n = snapshot.agents.len();
        if n == 0 {
            return Stats {
                generation,
                population_size: 0,
                survivors,
                error_min: 0.0,
                error_avg: 0.0,
                error_max: 0.0,
            };
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for a in &snapshot.agents {
            min = min.min(a.error);
            max = max.max(a.error);
            sum += a.error;
        }
        Stats {
            generation,
            population_size: n,
            survivors,
            error_min: min,
            error_avg: sum / n as f64,
            error_max: max,
        }
    }
}

/// Receives one frame per simulation iteration (§6 renderer contract).
/// Implementations decide whether/how to actually draw it; `NullSink`
/// discards every frame, which is what headless runs (benchmarks, tests,
/// CI) use. Invoked at most once per iteration; the kernel skips the call
/// entirely on non-real-time iterations other than a generation's last
/// (§6 real-time selector), so an implementation never has to self-throttle.
pub trait FrameSink {
    fn on_frame(&mut self, snapshot: &PopulationSnapshot, generation: u64, iter: u64, frame: u64, time: Duration, stats: &Stats);
}

/// Receives finalised framebuffers from the renderer for video encoding
/// (§6 video sink contract). The kernel itself never calls this — it has
/// no framebuffer to hand over, since rasterisation is the renderer's job
/// (§1 out of scope) — but the trait lives here because it's the contract
/// a real renderer/encoder pair is built against.
pub trait VideoSink {
    /// `rgb` is a packed RGB buffer, `pitch` bytes per row.
    fn submit_frame(&mut self, rgb: &[u8], width: u32, height: u32, pitch: u32) -> KernelResult<()>;

    /// Flushes and closes the encoder once the run ends. Default no-op
    /// for sinks (like `NullSink`) that never open anything to close.
    fn finish(&mut self) -> KernelResult<()> {
        Ok(())
    }
}

/// A `FrameSink`/`VideoSink` that discards everything — the default for
/// headless runs and for generations that aren't selected for real-time
/// display (§6).
#[derive(Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn on_frame(&mut self, _snapshot: &PopulationSnapshot, _generation: u64, _iter: u64, _frame: u64, _time: Duration, _stats: &Stats) {}
}

impl VideoSink for NullSink {
    fn submit_frame(&mut self, _rgb: &[u8], _width: u32, _height: u32, _pitch: u32) -> KernelResult<()> {
        Ok(())
    }
}
