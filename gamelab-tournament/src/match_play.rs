//! Match play - repeated games between two fixed players
//!
//! Level 2 - Phase-level implementation

use serde::{Deserialize, Serialize};

use gamelab_core::{Board, CoreError, Game, Player, Referee, Ruleset, Seat, Strategy};

/// Result of a match (multiple games)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Wins for the first mover
    pub first_wins: u32,
    /// Wins for the second mover
    pub second_wins: u32,
    /// Games that ended because a player had no legal move
    pub forfeits: u32,
    /// Moves applied across all games
    pub total_turns: u64,
    /// Total games played
    pub games_played: u32,
}

impl MatchResult {
    /// Create empty result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Combine two results
    pub fn combine(&self, other: &MatchResult) -> MatchResult {
        MatchResult {
            first_wins: self.first_wins + other.first_wins,
            second_wins: self.second_wins + other.second_wins,
            forfeits: self.forfeits + other.forfeits,
            total_turns: self.total_turns + other.total_turns,
            games_played: self.games_played + other.games_played,
        }
    }

    /// Get win rate for the first mover
    pub fn first_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.first_wins as f32 / self.games_played as f32
        }
    }

    /// Get win rate for the second mover
    pub fn second_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.second_wins as f32 / self.games_played as f32
        }
    }

    /// Average game length in moves
    pub fn avg_turns(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_turns as f32 / self.games_played as f32
        }
    }
}

/// Play `games` games with `first` always moving first (Level 2 phase)
///
/// Both players' records accumulate across the match.
pub fn play_match<G, A, B>(
    referee: &Referee<G>,
    board: &mut Board<G>,
    first: &mut Player<A>,
    second: &mut Player<B>,
    games: usize,
) -> Result<MatchResult, CoreError>
where
    G: Ruleset,
    A: Strategy<G>,
    B: Strategy<G>,
{
    let mut result = MatchResult::empty();
    if games == 0 {
        return Ok(result);
    }

    let mut game = Game::new(referee, board, first, second)?;
    for _ in 0..games {
        let outcome = game.play();
        match outcome.winner {
            Seat::First => result.first_wins += 1,
            Seat::Second => result.second_wins += 1,
        }
        if outcome.is_forfeit() {
            result.forfeits += 1;
        }
        result.total_turns += outcome.turns as u64;
        result.games_played += 1;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamelab_core::games::{Rook, RookStrategy, Takeaway, TakeawayStrategy};

    #[test]
    fn test_match_result_empty() {
        let result = MatchResult::empty();
        assert_eq!(result.games_played, 0);
        assert_eq!(result.first_win_rate(), 0.0);
        assert_eq!(result.avg_turns(), 0.0);
    }

    #[test]
    fn test_match_result_combine() {
        let a = MatchResult {
            first_wins: 3,
            second_wins: 1,
            forfeits: 1,
            total_turns: 40,
            games_played: 4,
        };
        let b = MatchResult {
            first_wins: 0,
            second_wins: 4,
            forfeits: 0,
            total_turns: 20,
            games_played: 4,
        };
        let combined = a.combine(&b);
        assert_eq!(combined.games_played, 8);
        assert_eq!(combined.first_wins, 3);
        assert_eq!(combined.second_win_rate(), 0.625);
        assert_eq!(combined.avg_turns(), 7.5);
    }

    #[test]
    fn test_play_match_even_pile() {
        let referee = Referee::new(Takeaway::new(10, 2).unwrap());
        let mut board = referee.new_board();
        let mut a = Player::new("a", TakeawayStrategy::TakeOne);
        let mut b = Player::new("b", TakeawayStrategy::TakeOne);

        let result = play_match(&referee, &mut board, &mut a, &mut b, 6).unwrap();
        assert_eq!(result.games_played, 6);
        assert_eq!(result.second_wins, 6);
        assert_eq!(result.total_turns, 60);
        assert_eq!(result.forfeits, 0);
        assert_eq!((a.losses, b.wins), (6, 6));
    }

    #[test]
    fn test_play_match_zero_games() {
        let referee = Referee::new(Rook::new(3, 3).unwrap());
        let mut board = referee.new_board();
        let mut a = Player::new("a", RookStrategy::Diagonal);
        let mut b = Player::new("b", RookStrategy::Diagonal);

        let result = play_match(&referee, &mut board, &mut a, &mut b, 0).unwrap();
        assert_eq!(result, MatchResult::empty());
        assert_eq!(a.games_played(), 0);
    }

    #[test]
    fn test_play_match_counts_forfeits() {
        let referee = Referee::new(Takeaway::new(3, 2).unwrap());
        let mut board = referee.new_board();
        let mut a = Player::new("a", TakeawayStrategy::TakeTwo);
        let mut b = Player::new("b", TakeawayStrategy::TakeTwo);

        let result = play_match(&referee, &mut board, &mut a, &mut b, 3).unwrap();
        assert_eq!(result.forfeits, 3);
        assert_eq!(result.first_wins, 3);
    }

    #[test]
    fn test_play_match_rejects_duplicate_names() {
        let referee = Referee::new(Takeaway::default());
        let mut board = referee.new_board();
        let mut a = Player::new("same", TakeawayStrategy::TakeOne);
        let mut b = Player::new("same", TakeawayStrategy::TakeOne);

        let result = play_match(&referee, &mut board, &mut a, &mut b, 2);
        assert!(matches!(result, Err(CoreError::DuplicatePlayerName(_))));
    }
}
