//! Evolution configuration

use gamelab_core::RefereeConfig;

use crate::error::EvolveError;

/// Evolution configuration
#[derive(Clone, Debug)]
pub struct EvolutionConfig {
    /// Target size of each seat's population
    pub population_size: usize,
    pub generations: usize,
    /// Opponents each player meets per tournament
    pub games_per_player: usize,
    /// Survival threshold for the first generation
    pub fitness: f32,
    /// Ceiling for the ratcheting threshold
    pub max_fitness: f32,
    /// Threshold increase after each generation
    pub fitness_increment: f32,
    /// Chance of a swap mutation per trait per child
    pub mutation_rate: f32,
    /// Clear win/loss records before each tournament
    pub reset_records: bool,
    pub referee: RefereeConfig,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            games_per_player: 10,
            fitness: 0.5,
            max_fitness: 0.9,
            fitness_increment: 0.025,
            mutation_rate: 0.025,
            reset_records: false,
            referee: RefereeConfig::default(),
        }
    }
}

impl EvolutionConfig {
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    pub fn with_games_per_player(mut self, games_per_player: usize) -> Self {
        self.games_per_player = games_per_player;
        self
    }

    pub fn with_fitness(mut self, fitness: f32, max_fitness: f32, fitness_increment: f32) -> Self {
        self.fitness = fitness;
        self.max_fitness = max_fitness;
        self.fitness_increment = fitness_increment;
        self
    }

    pub fn with_mutation_rate(mut self, mutation_rate: f32) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }

    pub fn with_reset_records(mut self, reset_records: bool) -> Self {
        self.reset_records = reset_records;
        self
    }

    /// Threshold for the generation after one run at `threshold`
    pub fn next_threshold(&self, threshold: f32) -> f32 {
        (threshold + self.fitness_increment).min(self.max_fitness)
    }

    pub fn validate(&self) -> Result<(), EvolveError> {
        let unit = 0.0..=1.0;
        if self.population_size < 2 {
            return Err(EvolveError::InvalidConfig(format!(
                "population size must be at least 2, got {}",
                self.population_size
            )));
        }
        if !unit.contains(&self.fitness) || !unit.contains(&self.max_fitness) {
            return Err(EvolveError::InvalidConfig(format!(
                "fitness thresholds must lie in [0, 1], got {} and {}",
                self.fitness, self.max_fitness
            )));
        }
        if self.fitness > self.max_fitness {
            return Err(EvolveError::InvalidConfig(format!(
                "starting fitness {} exceeds max fitness {}",
                self.fitness, self.max_fitness
            )));
        }
        if self.fitness_increment.is_nan() || self.fitness_increment < 0.0 {
            return Err(EvolveError::InvalidConfig(format!(
                "fitness increment must be non-negative, got {}",
                self.fitness_increment
            )));
        }
        if !unit.contains(&self.mutation_rate) {
            return Err(EvolveError::InvalidConfig(format!(
                "mutation rate must lie in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}
