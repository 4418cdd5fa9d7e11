//! Generation boundary: selection, reproduction and mutation (§4.7).

use tracing::info;

use crate::conditions::Predicate;
use crate::config::Config;
use crate::neural_agent::NeuralAgent;
use crate::population::Population;
use crate::rng::GlobalRng;

/// Runs one generation boundary against `pop` in place and reports how
/// many agents survived.
///
/// Steps, in order (§4.7):
/// 1. Select the survivors under `predicate`.
/// 2. If none survived, re-initialise the whole population from scratch
///    (Scenario E) rather than reproducing from an empty pool.
/// 3. Otherwise round-robin clone survivors up to the configured
///    population size, each offspring's brain isomorphic to its parent's
///    with weights and weight-delta signs copied across.
/// 4. Re-randomise every offspring's physical state.
/// 5. Mutate every offspring's weights.
#[tracing::instrument(skip(pop, cfg, predicate, rng))]
pub fn advance_generation(pop: Population, cfg: &Config, predicate: &Predicate, rng: &mut GlobalRng) -> (Population, usize) {
    let agents = pop.into_agents();
    let survivors: Vec<&NeuralAgent> = agents.iter().filter(|a| predicate.eval(&a.agent, cfg)).collect();
    let survivor_count = survivors.len();

    let mut next_gen: Vec<NeuralAgent> = if survivors.is_empty() {
        info!("no survivors this generation, re-initialising population from scratch");
        (0..cfg.numboids).map(|_| NeuralAgent::new(cfg, rng)).collect()
    } else {
        info!(survivor_count, "reproducing next generation from survivors");
        (0..cfg.numboids)
            .map(|i| {
                let parent = survivors[i % survivors.len()];
                let mut child = NeuralAgent::reproduce_from(parent, cfg);
                child.agent.randomize_physical(cfg, rng);
                child
            })
            .collect()
    };

    for agent in &mut next_gen {
        mutate(agent, cfg, rng);
    }

    (Population::from_agents(next_gen), survivor_count)
}

/// Mutates every connection weight in `agent`'s brain independently
/// (§4.7 step 5): `w_j += delta_j * u * M`, `u` drawn fresh per connection
/// from `[0, 1)`, optionally clamped to `+/- max_weight`, with an
/// independent chance `M` (the configured mutation rate) to flip
/// `delta_j`'s sign for the *next* generation's step.
fn mutate(agent: &mut NeuralAgent, cfg: &Config, rng: &mut GlobalRng) {
    let brain = agent.brain_mut();
    for i in 0..brain.len() {
        let u = rng.uniform();
        let mut w = brain.weight(i) + brain.weight_delta(i) * u * cfg.mutation;
        if cfg.bounded_weights {
            w = w.clamp(-cfg.max_weight, cfg.max_weight);
        }
        brain.set_weight(i, w);

        if rng.uniform() < cfg.mutation {
            brain.flip_weight_delta(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::DEFAULT_SURVIVAL;

    #[test]
    fn advance_generation_preserves_population_size() {
        let mut cfg = Config::default();
        cfg.numboids = 20;
        let mut rng = GlobalRng::from_seed(5);
        let pop = Population::new(&cfg, &mut rng);
        let (next, _survivors) = advance_generation(pop, &cfg, &DEFAULT_SURVIVAL, &mut rng);
        assert_eq!(next.len(), 20);
    }

    #[test]
    fn zero_survivors_reinitialises_rather_than_panicking() {
        // Scenario E: an unsatisfiable predicate leaves zero survivors.
        let mut cfg = Config::default();
        cfg.numboids = 10;
        let mut rng = GlobalRng::from_seed(6);
        let pop = Population::new(&cfg, &mut rng);
        let impossible = Predicate::new(|_a, _c| false);
        let (next, survivors) = advance_generation(pop, &cfg, &impossible, &mut rng);
        assert_eq!(survivors, 0);
        assert_eq!(next.len(), 10);
    }

    #[test]
    fn zero_mutation_rate_keeps_weights_within_reproduction_tolerance() {
        let mut cfg = Config::default();
        cfg.numboids = 8;
        cfg.mutation = 0.0;
        let mut rng = GlobalRng::from_seed(7);
        let pop = Population::new(&cfg, &mut rng);
        let original_weights: Vec<Vec<f64>> = pop
            .agents()
            .iter()
            .map(|a| (0..a.brain().len()).map(|i| a.brain().weight(i)).collect())
            .collect();

        let always = Predicate::new(|_a, _c| true);
        let (next, survivors) = advance_generation(pop, &cfg, &always, &mut rng);
        assert_eq!(survivors, 8);
        for (agent, parent_weights) in next.agents().iter().zip(original_weights.iter()) {
            for i in 0..agent.brain().len() {
                assert_eq!(agent.brain().weight(i), parent_weights[i]);
            }
        }
    }
}
