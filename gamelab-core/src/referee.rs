//! Referee - mediates between players, a ruleset and a board

use rustc_hash::FxHashSet;

use crate::board::Board;
use crate::player::Player;
use crate::ruleset::{Ruleset, Seat};
use crate::strategy::Strategy;

/// Referee configuration
#[derive(Clone, Debug)]
pub struct RefereeConfig {
    /// Proposals a player may make in one turn before forfeiting
    pub max_attempts: usize,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self { max_attempts: 16 }
    }
}

impl RefereeConfig {
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Proposals actually requested per turn; every turn asks at least once
    pub fn attempts(&self) -> usize {
        self.max_attempts.max(1)
    }
}

/// Runtime enforcer of a ruleset
#[derive(Clone, Debug)]
pub struct Referee<G: Ruleset> {
    rules: G,
    config: RefereeConfig,
}

impl<G: Ruleset> Referee<G> {
    pub fn new(rules: G) -> Self {
        Self::with_config(rules, RefereeConfig::default())
    }

    pub fn with_config(rules: G, config: RefereeConfig) -> Self {
        Self { rules, config }
    }

    pub fn rules(&self) -> &G {
        &self.rules
    }

    pub fn config(&self) -> &RefereeConfig {
        &self.config
    }

    /// A fresh board for this referee's game
    pub fn new_board(&self) -> Board<G> {
        Board::new(&self.rules)
    }

    /// Request moves from `player` until one is legal.
    ///
    /// Returns `None` (forfeiture) when the strategy offers no move, or when
    /// `max_attempts` proposals have been made without a legal one. A move
    /// already rejected this turn still costs an attempt but is not judged
    /// again.
    pub fn ask_for_move<S: Strategy<G>>(
        &self,
        player: &mut Player<S>,
        board: &Board<G>,
    ) -> Option<G::Move> {
        let mut rejected: FxHashSet<G::Move> = FxHashSet::default();

        let attempts = self.config.attempts();
        for _ in 0..attempts {
            let proposal = player.strategy.propose(board)?;

            if rejected.contains(&proposal) {
                continue;
            }
            if self.rules.is_legal(board, Some(&proposal)) {
                return Some(proposal);
            }
            rejected.insert(proposal);
        }

        tracing::debug!(
            "{} made no legal move in {} attempts ({} distinct rejected)",
            player.name,
            attempts,
            rejected.len()
        );
        None
    }

    /// Apply a legal move
    pub fn update_board(&self, board: &mut Board<G>, actor: &str, mv: G::Move) {
        debug_assert!(self.rules.is_legal(board, Some(&mv)), "referee applied an illegal move");
        self.rules.update_board(board, actor, mv);
    }

    pub fn is_game_over(&self, board: &Board<G>) -> bool {
        self.rules.is_game_over(board)
    }

    /// Resolve the winner of a terminal board and credit both players
    pub fn declare_winner<A, B>(
        &self,
        board: &mut Board<G>,
        to_move: Seat,
        first: &mut Player<A>,
        second: &mut Player<B>,
    ) -> Seat {
        let winner = self.rules.declare_winner(board, to_move);
        self.award(board, winner, first, second);
        winner
    }

    /// Record `winner` on the board and update both players' counters
    pub fn award<A, B>(
        &self,
        board: &mut Board<G>,
        winner: Seat,
        first: &mut Player<A>,
        second: &mut Player<B>,
    ) {
        board.set_winner(winner);
        match winner {
            Seat::First => {
                first.record_win();
                second.record_loss();
            }
            Seat::Second => {
                second.record_win();
                first.record_loss();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::takeaway::Takeaway;

    /// Proposes the same fixed move every time
    struct Fixed(Option<u32>, usize);

    impl Strategy<Takeaway> for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn propose(&mut self, _board: &Board<Takeaway>) -> Option<u32> {
            self.1 += 1;
            self.0
        }
    }

    /// Walks through a script of proposals, then gives up
    struct Script(Vec<u32>, usize);

    impl Strategy<Takeaway> for Script {
        fn name(&self) -> &str {
            "script"
        }

        fn propose(&mut self, _board: &Board<Takeaway>) -> Option<u32> {
            let mv = self.0.get(self.1).copied();
            self.1 += 1;
            mv
        }
    }

    fn referee() -> Referee<Takeaway> {
        Referee::new(Takeaway::new(5, 2).unwrap())
    }

    #[test]
    fn test_legal_move_accepted_first_try() {
        let referee = referee();
        let board = referee.new_board();
        let mut player = Player::new("p", Fixed(Some(2), 0));
        assert_eq!(referee.ask_for_move(&mut player, &board), Some(2));
        assert_eq!(player.strategy.1, 1);
    }

    #[test]
    fn test_none_forfeits_immediately() {
        let referee = referee();
        let board = referee.new_board();
        let mut player = Player::new("p", Fixed(None, 0));
        assert_eq!(referee.ask_for_move(&mut player, &board), None);
        assert_eq!(player.strategy.1, 1);
    }

    #[test]
    fn test_repeated_illegal_move_is_bounded() {
        let referee = Referee::with_config(
            Takeaway::new(5, 2).unwrap(),
            RefereeConfig::default().with_max_attempts(5),
        );
        let board = referee.new_board();
        let mut player = Player::new("p", Fixed(Some(3), 0));
        assert_eq!(referee.ask_for_move(&mut player, &board), None);
        assert_eq!(player.strategy.1, 5);
    }

    #[test]
    fn test_zero_attempt_cap_still_asks_once() {
        let config = RefereeConfig::default().with_max_attempts(0);
        assert_eq!(config.attempts(), 1);
        assert_eq!(RefereeConfig::default().attempts(), 16);

        let referee = Referee::with_config(Takeaway::new(5, 2).unwrap(), config);
        let board = referee.new_board();
        let mut player = Player::new("p", Fixed(Some(3), 0));
        assert_eq!(referee.ask_for_move(&mut player, &board), None);
        assert_eq!(player.strategy.1, 1);

        let mut player = Player::new("p", Fixed(Some(1), 0));
        assert_eq!(referee.ask_for_move(&mut player, &board), Some(1));
    }

    #[test]
    fn test_retries_until_legal() {
        let referee = referee();
        let board = referee.new_board();
        let mut player = Player::new("p", Script(vec![0, 7, 0, 1], 0));
        assert_eq!(referee.ask_for_move(&mut player, &board), Some(1));
    }

    #[test]
    fn test_script_exhausted_forfeits() {
        let referee = referee();
        let board = referee.new_board();
        let mut player = Player::new("p", Script(vec![9, 8], 0));
        assert_eq!(referee.ask_for_move(&mut player, &board), None);
    }

    #[test]
    fn test_declare_winner_credits_both_players() {
        let referee = referee();
        let mut board = referee.new_board();
        let mut first = Player::new("a", Fixed(Some(1), 0));
        let mut second = Player::new("b", Fixed(Some(1), 0));

        for (actor, mv) in [("a", 2), ("b", 2), ("a", 1)] {
            referee.update_board(&mut board, actor, mv);
        }
        assert!(referee.is_game_over(&board));

        let winner = referee.declare_winner(&mut board, Seat::Second, &mut first, &mut second);
        assert_eq!(winner, Seat::First);
        assert_eq!(board.winner(), Some(Seat::First));
        assert_eq!((first.wins, first.losses), (1, 0));
        assert_eq!((second.wins, second.losses), (0, 1));
    }
}
