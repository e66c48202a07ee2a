//! Player - a named strategy with a win/loss record

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A participant in games and tournaments
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player<S> {
    pub name: String,
    pub strategy: S,
    pub wins: u32,
    pub losses: u32,
    /// Breeding depth: 0 for generated players, max(parents) + 1 for children
    pub generation: u32,
}

impl<S> Player<S> {
    pub fn new(name: impl Into<String>, strategy: S) -> Self {
        Self {
            name: name.into(),
            strategy,
            wins: 0,
            losses: 0,
            generation: 0,
        }
    }

    pub fn with_generation(mut self, generation: u32) -> Self {
        self.generation = generation;
        self
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    /// Win rate, 0.0 if no games have been played
    pub fn fitness(&self) -> f32 {
        let total = self.games_played();
        if total == 0 {
            0.0
        } else {
            self.wins as f32 / total as f32
        }
    }

    pub fn record_win(&mut self) {
        self.wins += 1;
    }

    pub fn record_loss(&mut self) {
        self.losses += 1;
    }

    /// Clear the win/loss record
    pub fn reset_record(&mut self) {
        self.wins = 0;
        self.losses = 0;
    }

    /// Total order by fitness
    pub fn cmp_fitness(&self, other: &Self) -> Ordering {
        self.fitness().total_cmp(&other.fitness())
    }
}

/// Sort players by fitness, best first. Ties keep their relative order.
pub fn sort_by_fitness_desc<S>(players: &mut [Player<S>]) {
    players.sort_by(|a, b| b.cmp_fitness(a));
}
