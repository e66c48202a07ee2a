//! Configuration types for tournament play
//!
//! Level 4 - Utilities and configuration

use gamelab_core::RefereeConfig;

/// Tournament configuration
#[derive(Clone, Debug)]
pub struct TournamentConfig {
    /// Opponents each player faces (capped at the opposing population size)
    pub games_per_player: usize,
    /// Minimum win rate a player needs to survive elimination
    pub fitness_threshold: f32,
    /// Referee settings for every game
    pub referee: RefereeConfig,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            games_per_player: 10,
            fitness_threshold: 0.8,
            referee: RefereeConfig::default(),
        }
    }
}

impl TournamentConfig {
    pub fn new(games_per_player: usize, fitness_threshold: f32) -> Self {
        Self {
            games_per_player,
            fitness_threshold,
            ..Default::default()
        }
    }

    pub fn with_games_per_player(mut self, games_per_player: usize) -> Self {
        self.games_per_player = games_per_player;
        self
    }

    pub fn with_fitness_threshold(mut self, fitness_threshold: f32) -> Self {
        self.fitness_threshold = fitness_threshold;
        self
    }

    pub fn with_referee(mut self, referee: RefereeConfig) -> Self {
        self.referee = referee;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tournament_config_defaults() {
        let config = TournamentConfig::default();
        assert_eq!(config.games_per_player, 10);
        assert_eq!(config.fitness_threshold, 0.8);
        assert_eq!(config.referee.max_attempts, 16);
    }

    #[test]
    fn test_tournament_config_builders() {
        let config = TournamentConfig::new(4, 0.5)
            .with_referee(RefereeConfig::default().with_max_attempts(3))
            .with_games_per_player(6);
        assert_eq!(config.games_per_player, 6);
        assert_eq!(config.fitness_threshold, 0.5);
        assert_eq!(config.referee.max_attempts, 3);

        let config = config.with_fitness_threshold(0.9);
        assert_eq!(config.fitness_threshold, 0.9);
    }
}
