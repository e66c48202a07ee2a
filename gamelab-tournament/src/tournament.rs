//! Tournament elimination
//!
//! Level 1 - Orchestration and Level 2 - Phases

use rand::Rng;

use gamelab_core::{sort_by_fitness_desc, Board, CoreError, Player, Referee, Ruleset, Strategy};

use crate::config::TournamentConfig;
use crate::match_play::{play_match, MatchResult};

/// Survivors of one round of elimination
#[derive(Clone, Debug)]
pub struct CompeteResult<A, B> {
    /// First-seat elites, best first
    pub first: Vec<Player<A>>,
    /// Second-seat elites, best first
    pub second: Vec<Player<B>>,
    /// Games played across both phases
    pub games_played: u32,
    /// Games decided by forfeit
    pub forfeits: u32,
}

/// Elimination tournament between a first-seat and a second-seat population.
///
/// Owns one referee and one board that is reset for every game.
pub struct Tournament<G: Ruleset> {
    referee: Referee<G>,
    board: Board<G>,
    config: TournamentConfig,
}

impl<G: Ruleset> Tournament<G> {
    pub fn new(rules: G, config: TournamentConfig) -> Self {
        let referee = Referee::with_config(rules, config.referee.clone());
        let board = referee.new_board();
        Self {
            referee,
            board,
            config,
        }
    }

    pub fn referee(&self) -> &Referee<G> {
        &self.referee
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn set_fitness_threshold(&mut self, fitness_threshold: f32) {
        self.config.fitness_threshold = fitness_threshold;
    }

    // ========================================================================
    // Level 1 - Orchestration
    // ========================================================================

    /// Play one round of elimination and keep the elites of each side.
    ///
    /// Every first-seat player meets up to `games_per_player` sampled
    /// second-seat opponents, then every second-seat player meets up to
    /// `games_per_player` sampled first-seat opponents. First-seat players
    /// always move first. Only after both phases are players filtered on
    /// `fitness >= fitness_threshold`.
    pub fn compete<A, B, R>(
        &mut self,
        mut first: Vec<Player<A>>,
        mut second: Vec<Player<B>>,
        rng: &mut R,
    ) -> Result<CompeteResult<A, B>, CoreError>
    where
        A: Strategy<G>,
        B: Strategy<G>,
        R: Rng + ?Sized,
    {
        let games = self.config.games_per_player;
        let mut totals = MatchResult::empty();

        // Phase 1: first-seat players pick their opponents
        for i in 0..first.len() {
            for j in sample_opponents(second.len(), games, rng) {
                let result = play_match(&self.referee, &mut self.board, &mut first[i], &mut second[j], 1)?;
                totals = totals.combine(&result);
            }
        }

        // Phase 2: second-seat players pick theirs
        for j in 0..second.len() {
            for i in sample_opponents(first.len(), games, rng) {
                let result = play_match(&self.referee, &mut self.board, &mut first[i], &mut second[j], 1)?;
                totals = totals.combine(&result);
            }
        }

        let threshold = self.config.fitness_threshold;
        let entrants = (first.len(), second.len());
        let first = retain_elite(first, threshold);
        let second = retain_elite(second, threshold);

        tracing::debug!(
            "{} games ({} forfeits), survivors {}/{} and {}/{} at threshold {:.3}",
            totals.games_played,
            totals.forfeits,
            first.len(),
            entrants.0,
            second.len(),
            entrants.1,
            threshold
        );

        Ok(CompeteResult {
            first,
            second,
            games_played: totals.games_played,
            forfeits: totals.forfeits,
        })
    }
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Distinct opponent indices, at most `population` of them
fn sample_opponents<R: Rng + ?Sized>(population: usize, games: usize, rng: &mut R) -> Vec<usize> {
    rand::seq::index::sample(rng, population, games.min(population)).into_vec()
}

/// Players at or above the threshold, best first
fn retain_elite<S>(mut players: Vec<Player<S>>, threshold: f32) -> Vec<Player<S>> {
    players.retain(|p| p.fitness() >= threshold);
    sort_by_fitness_desc(&mut players);
    players
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamelab_core::games::{Coloring, OrderedColoring, Takeaway, TakeawayStrategy};
    use gamelab_core::Graph;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn takeaway_players(prefix: &str, strategies: Vec<TakeawayStrategy>) -> Vec<Player<TakeawayStrategy>> {
        strategies
            .into_iter()
            .enumerate()
            .map(|(i, s)| Player::new(format!("{} #{}", prefix, i), s))
            .collect()
    }

    #[test]
    fn test_sample_opponents_capped_and_distinct() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut picks = sample_opponents(3, 10, &mut rng);
        picks.sort_unstable();
        assert_eq!(picks, vec![0, 1, 2]);
        assert!(sample_opponents(0, 4, &mut rng).is_empty());
        assert_eq!(sample_opponents(10, 4, &mut rng).len(), 4);
    }

    #[test]
    fn test_compete_keeps_only_winners() {
        let rules = Takeaway::new(10, 2).unwrap();
        let mut tournament = Tournament::new(rules, TournamentConfig::new(2, 0.8));
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let first = takeaway_players(
            "p1",
            vec![TakeawayStrategy::optimal(2, 10), TakeawayStrategy::TakeOne],
        );
        let second = takeaway_players("p2", vec![TakeawayStrategy::TakeOne, TakeawayStrategy::TakeOne]);

        let result = tournament.compete(first, second, &mut rng).unwrap();
        assert_eq!(result.games_played, 8);
        assert_eq!(result.first.len(), 1);
        assert_eq!(result.first[0].name, "p1 #0");
        assert_eq!((result.first[0].wins, result.first[0].losses), (4, 0));
        // Each second-seat player beat the naive player once and lost once to the smart one
        assert!(result.second.is_empty());
    }

    #[test]
    fn test_compete_caps_games_at_population_size() {
        let rules = Takeaway::new(9, 2).unwrap();
        let mut tournament = Tournament::new(rules, TournamentConfig::new(5, 0.0));
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let first = takeaway_players("p1", vec![TakeawayStrategy::TakeOne; 3]);
        let second = takeaway_players("p2", vec![TakeawayStrategy::TakeOne]);

        let result = tournament.compete(first, second, &mut rng).unwrap();
        assert_eq!(result.games_played, 6);
        assert_eq!(result.first.len(), 3);
        assert!(result.first.iter().all(|p| p.games_played() == 2));
        assert_eq!(result.second[0].games_played(), 6);
    }

    #[test]
    fn test_compete_empty_opponents() {
        let rules = Takeaway::new(9, 2).unwrap();
        let mut tournament = Tournament::new(rules, TournamentConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let first = takeaway_players("p1", vec![TakeawayStrategy::TakeOne; 2]);
        let result = tournament.compete(first, Vec::<Player<TakeawayStrategy>>::new(), &mut rng).unwrap();
        assert_eq!(result.games_played, 0);
        assert!(result.first.is_empty());
        assert!(result.second.is_empty());
    }

    #[test]
    fn test_compete_elites_meet_threshold_and_are_sorted() {
        let graph = Graph::from_edges(7, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 0), (0, 3), (2, 5)])
            .unwrap();
        let rules = Coloring::new(graph, 3).unwrap();
        let threshold = 0.5;
        let mut tournament = Tournament::new(rules, TournamentConfig::new(4, threshold));
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        let first: Vec<_> = (0..8)
            .map(|i| {
                let name = format!("Player 1 #0.{}", i);
                Player::new(name.clone(), OrderedColoring::random_init(&name, 7, 3, &mut rng))
            })
            .collect();
        let second: Vec<_> = (0..8)
            .map(|i| {
                let name = format!("Player 2 #0.{}", i);
                Player::new(name.clone(), OrderedColoring::random_init(&name, 7, 3, &mut rng))
            })
            .collect();

        let result = tournament.compete(first, second, &mut rng).unwrap();
        assert_eq!(result.games_played, 64);
        for elites in [
            result.first.iter().map(|p| p.fitness()).collect::<Vec<_>>(),
            result.second.iter().map(|p| p.fitness()).collect::<Vec<_>>(),
        ] {
            assert!(elites.iter().all(|&f| f >= threshold));
            assert!(elites.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn test_compete_rejects_name_collision() {
        let rules = Takeaway::new(9, 2).unwrap();
        let mut tournament = Tournament::new(rules, TournamentConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let first = takeaway_players("same", vec![TakeawayStrategy::TakeOne]);
        let second = takeaway_players("same", vec![TakeawayStrategy::TakeOne]);
        let result = tournament.compete(first, second, &mut rng);
        assert!(matches!(result, Err(CoreError::DuplicatePlayerName(_))));
    }
}
