//! Genetic algorithm: tournament elimination plus breeding
//!
//! Level 1 - Orchestration

use gamelab_core::{Evolvable, Player, Ruleset, Seat, Strategy};
use gamelab_tournament::{Tournament, TournamentConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::config::EvolutionConfig;
use crate::error::EvolveError;
use crate::population::{generate_population, repopulate};

/// Summary of one generation
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerationStats {
    /// 1-based generation number, matching child names
    pub generation: u32,
    /// Survival threshold used in this generation's tournament
    pub threshold: f32,
    pub first_survivors: usize,
    pub second_survivors: usize,
    pub games_played: u32,
    pub forfeits: u32,
    /// Best surviving fitness, 0.0 when nobody survived
    pub best_first: f32,
    pub best_second: f32,
}

/// Final populations and per-generation history
#[derive(Clone, Debug, Serialize)]
pub struct EvolutionResult<S> {
    /// First-seat population, best first
    pub first: Vec<Player<S>>,
    /// Second-seat population, best first
    pub second: Vec<Player<S>>,
    pub history: Vec<GenerationStats>,
}

/// Co-evolves a first-seat and a second-seat population of strategies
/// derived from one baseline.
pub struct GeneticAlgorithm<G, S> {
    rules: G,
    baseline: S,
    config: EvolutionConfig,
}

impl<G, S> GeneticAlgorithm<G, S>
where
    G: Ruleset + Clone,
    S: Strategy<G> + Evolvable,
{
    pub fn new(rules: G, baseline: S, config: EvolutionConfig) -> Result<Self, EvolveError> {
        config.validate()?;
        Ok(Self {
            rules,
            baseline,
            config,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Run with a ChaCha8 generator seeded from `seed`
    pub fn evolve_seeded(&self, seed: u64) -> Result<EvolutionResult<S>, EvolveError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.evolve(&mut rng)
    }

    pub fn evolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<EvolutionResult<S>, EvolveError> {
        self.evolve_with_callback(rng, |_| {})
    }

    /// Run every generation, calling `callback` after each one
    pub fn evolve_with_callback<R, F>(&self, rng: &mut R, mut callback: F) -> Result<EvolutionResult<S>, EvolveError>
    where
        R: Rng + ?Sized,
        F: FnMut(&GenerationStats),
    {
        let config = &self.config;
        let size = config.population_size;

        let mut first = generate_population(&self.baseline, size, Seat::First, rng);
        let mut second = generate_population(&self.baseline, size, Seat::Second, rng);
        tracing::info!(
            "Generated populations of {} and {} from {} baseline",
            first.len(),
            second.len(),
            self.rules.name()
        );

        let tournament_config = TournamentConfig::new(config.games_per_player, config.fitness)
            .with_referee(config.referee.clone());
        let mut tournament = Tournament::new(self.rules.clone(), tournament_config);
        let mut threshold = config.fitness;
        let mut history = Vec::with_capacity(config.generations);

        for index in 0..config.generations {
            let generation = index as u32 + 1;

            if config.reset_records {
                first.iter_mut().for_each(Player::reset_record);
                second.iter_mut().for_each(Player::reset_record);
            }

            // Level 2: elimination
            tournament.set_fitness_threshold(threshold);
            let result = tournament.compete(first, second, rng)?;

            let stats = GenerationStats {
                generation,
                threshold,
                first_survivors: result.first.len(),
                second_survivors: result.second.len(),
                games_played: result.games_played,
                forfeits: result.forfeits,
                best_first: result.first.first().map_or(0.0, Player::fitness),
                best_second: result.second.first().map_or(0.0, Player::fitness),
            };

            // Level 2: breeding
            first = repopulate(result.first, &self.baseline, size, Seat::First, generation, config.mutation_rate, rng)?;
            second = repopulate(result.second, &self.baseline, size, Seat::Second, generation, config.mutation_rate, rng)?;

            tracing::info!(
                "Gen {}: threshold {:.3}, survivors {}/{} and {}/{}, best {:.3} / {:.3}",
                generation,
                threshold,
                stats.first_survivors,
                size,
                stats.second_survivors,
                size,
                stats.best_first,
                stats.best_second
            );

            callback(&stats);
            history.push(stats);
            threshold = config.next_threshold(threshold);
        }

        Ok(EvolutionResult {
            first,
            second,
            history,
        })
    }
}
