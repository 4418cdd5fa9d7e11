//! The full set of simulated agents (§2 component 6, §5).

use crate::config::Config;
use crate::neural_agent::NeuralAgent;
use crate::rng::GlobalRng;

/// Owns every `NeuralAgent` and drives the per-iteration update sweep.
///
/// The sweep runs data-parallel over `rayon` when the feature is enabled
/// (the crate's default), sequentially otherwise — callers see identical
/// results either way (Testable Property 5), since no agent's update reads
/// or writes another agent's state.
pub struct Population {
    agents: Vec<NeuralAgent>,
}

impl Population {
    /// Builds a population of `cfg.numboids` freshly randomised agents.
    #[tracing::instrument(skip(cfg, rng), fields(numboids = cfg.numboids))]
    pub fn new(cfg: &Config, rng: &mut GlobalRng) -> Self {
        let agents = (0..cfg.numboids).map(|_| NeuralAgent::new(cfg, rng)).collect();
        Population { agents }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agents(&self) -> &[NeuralAgent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [NeuralAgent] {
        &mut self.agents
    }

    pub fn into_agents(self) -> Vec<NeuralAgent> {
        self.agents
    }

    pub fn from_agents(agents: Vec<NeuralAgent>) -> Self {
        Population { agents }
    }

    /// Runs one simulation iteration across every agent (§4.4, §4.6).
    #[cfg(feature = "rayon")]
    #[tracing::instrument(skip(self, cfg, predicate))]
    pub fn update_all(&mut self, cfg: &Config, predicate: &crate::conditions::Predicate, iter: u64) {
        use rayon::prelude::*;
        self.agents.par_iter_mut().for_each(|a| a.update(cfg, predicate, iter));
    }

    #[cfg(not(feature = "rayon"))]
    #[tracing::instrument(skip(self, cfg, predicate))]
    pub fn update_all(&mut self, cfg: &Config, predicate: &crate::conditions::Predicate, iter: u64) {
        for a in &mut self.agents {
            a.update(cfg, predicate, iter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::DEFAULT_SURVIVAL;

    #[test]
    fn population_has_the_configured_size() {
        let mut cfg = Config::default();
        cfg.numboids = 37;
        let mut rng = GlobalRng::from_seed(1);
        let pop = Population::new(&cfg, &mut rng);
        assert_eq!(pop.len(), 37);
    }

    #[test]
    fn update_all_runs_without_panicking() {
        let mut cfg = Config::default();
        cfg.numboids = 16;
        let mut rng = GlobalRng::from_seed(2);
        let mut pop = Population::new(&cfg, &mut rng);
        pop.update_all(&cfg, &DEFAULT_SURVIVAL, 0);
    }
}
