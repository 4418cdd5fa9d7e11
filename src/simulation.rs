//! The outer generation loop and inner iteration loop (§4.6, §6).

use std::time::{Duration, Instant};

use tracing::info;

use crate::conditions::Predicate;
use crate::config::Config;
use crate::evolution::advance_generation;
use crate::population::Population;
use crate::render::{FrameSink, PopulationSnapshot, Stats, VideoSink};
use crate::rng::GlobalRng;

/// Real-time generations are paced to roughly this frame rate so a human
/// watching the render keeps up with the simulation; headless generations
/// run unpaced, as fast as the kernel allows.
const REALTIME_FRAME_INTERVAL: Duration = Duration::from_micros(1_000_000 / 24);

/// Drives the simulation to completion: `cfg.max_gens` generation
/// boundaries, each preceded by `cfg.gen_iters` per-agent update
/// iterations. Every `cfg.realtime_every_ngens`-th generation after the
/// first is paced and forwarded to `frame_sink`; all others (including
/// generation 0) render only their final iteration. `video_sink` is not
/// fed frames by the kernel itself (rasterisation is the renderer's job,
/// §1) but is still given the chance to flush/close once the run ends.
#[tracing::instrument(skip(cfg, predicate, rng, frame_sink, video_sink))]
pub fn run<F: FrameSink, V: VideoSink>(
    cfg: &Config,
    predicate: &Predicate,
    rng: &mut GlobalRng,
    frame_sink: &mut F,
    video_sink: &mut V,
) {
    let mut pop = Population::new(cfg, rng);
    let mut survivors_prev_gen = 0usize;
    let mut frame_counter = 0u64;
    let start = Instant::now();

    for gen in 0..cfg.max_gens {
        let realtime = is_realtime_generation(gen, cfg.realtime_every_ngens);
        run_generation(
            &mut pop,
            cfg,
            predicate,
            gen,
            survivors_prev_gen,
            realtime,
            frame_sink,
            &mut frame_counter,
            start,
        );

        let (next_pop, survivors) = advance_generation(pop, cfg, predicate, rng);
        pop = next_pop;
        survivors_prev_gen = survivors;

        info!(generation = gen, survivors, "generation complete");
    }

    let _ = video_sink.finish();
}

/// Every `every_n`-th generation renders in real time, but never the
/// first (§6, `original_source/src/main.cpp`: "slow down for real-time
/// animation ... but not the first"); `every_n == 0` disables real-time
/// rendering entirely.
fn is_realtime_generation(gen: u64, every_n: u64) -> bool {
    every_n != 0 && gen != 0 && gen % every_n == 0
}

/// Runs the `cfg.gen_iters` iterations of one generation. A real-time
/// generation renders and paces every iteration; a headless generation
/// renders only its final iteration, so the renderer still sees the
/// generation's resting state without paying per-iteration frame cost
/// (§6: "called only on the final iteration of the generation").
#[allow(clippy::too_many_arguments)]
fn run_generation<F: FrameSink>(
    pop: &mut Population,
    cfg: &Config,
    predicate: &Predicate,
    gen: u64,
    survivors_prev_gen: usize,
    realtime: bool,
    frame_sink: &mut F,
    frame_counter: &mut u64,
    run_start: Instant,
) {
    for iter in 0..cfg.gen_iters {
        let frame_start = Instant::now();

        pop.update_all(cfg, predicate, iter);

        let is_final_iter = iter + 1 == cfg.gen_iters;
        if realtime || is_final_iter {
            let snapshot = PopulationSnapshot::capture(pop, cfg);
            let stats = Stats::compute(gen, survivors_prev_gen, &snapshot);
            frame_sink.on_frame(&snapshot, gen, iter, *frame_counter, run_start.elapsed(), &stats);
            *frame_counter += 1;
        }

        if realtime {
            let elapsed = frame_start.elapsed();
            if elapsed < REALTIME_FRAME_INTERVAL {
                std::thread::sleep(REALTIME_FRAME_INTERVAL - elapsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::DEFAULT_SURVIVAL;
    use crate::render::NullSink;

    #[test]
    fn realtime_schedule_never_includes_generation_zero() {
        assert!(!is_realtime_generation(0, 25));
        assert!(is_realtime_generation(25, 25));
        assert!(!is_realtime_generation(1, 25));
    }

    #[test]
    fn realtime_schedule_disabled_when_every_n_is_zero() {
        assert!(!is_realtime_generation(0, 0));
        assert!(!is_realtime_generation(25, 0));
    }

    #[test]
    fn headless_generation_still_renders_its_final_iteration() {
        struct CountingSink {
            frames: usize,
        }
        impl FrameSink for CountingSink {
            fn on_frame(
                &mut self,
                _snapshot: &PopulationSnapshot,
                _generation: u64,
                _iter: u64,
                _frame: u64,
                _time: Duration,
                _stats: &Stats,
            ) {
                self.frames += 1;
            }
        }

        let mut cfg = Config::default();
        cfg.numboids = 4;
        cfg.gen_iters = 5;
        cfg.realtime_every_ngens = 0;
        let mut rng = GlobalRng::from_seed(11);
        let mut pop = Population::new(&cfg, &mut rng);
        let mut sink = CountingSink { frames: 0 };
        let mut frame_counter = 0u64;

        run_generation(&mut pop, &cfg, &DEFAULT_SURVIVAL, 0, 0, false, &mut sink, &mut frame_counter, Instant::now());

        assert_eq!(sink.frames, 1);
        assert_eq!(frame_counter, 1);
    }

    #[test]
    fn short_run_completes_without_panicking() {
        let mut cfg = Config::default();
        cfg.numboids = 6;
        cfg.max_gens = 2;
        cfg.gen_iters = 3;
        cfg.realtime_every_ngens = 0;
        let mut rng = GlobalRng::from_seed(9);
        let mut frames = NullSink;
        let mut video = NullSink;
        run(&cfg, &DEFAULT_SURVIVAL, &mut rng, &mut frames, &mut video);
    }
}
