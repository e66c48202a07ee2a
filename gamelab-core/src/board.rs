//! Board - passive state container with a move log

use serde::{Deserialize, Serialize};

use crate::ruleset::{Ruleset, Seat};

/// One logged move
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn<M> {
    /// Position of this entry in the history (0-based)
    pub ply: usize,
    /// Fingerprint of the state before the move was applied
    pub fingerprint: String,
    /// Name of the player who made the move
    pub actor: String,
    pub mv: M,
}

/// Game board: current state, the snapshot it resets to, and a log.
///
/// A board never validates moves. It has no knowledge of players or rules.
pub struct Board<G: Ruleset> {
    initial_state: G::State,
    state: G::State,
    bounds: G::Bounds,
    history: Vec<Turn<G::Move>>,
    winner: Option<Seat>,
}

impl<G: Ruleset> Board<G> {
    /// Create a board in the ruleset's initial state
    pub fn new(rules: &G) -> Self {
        Self::from_state(rules.initial_state(), rules.bounds())
    }

    /// Create a board from an explicit starting state
    pub fn from_state(initial_state: G::State, bounds: G::Bounds) -> Self {
        Self {
            state: initial_state.clone(),
            initial_state,
            bounds,
            history: Vec::new(),
            winner: None,
        }
    }

    /// Restore the starting state and clear history and winner
    pub fn reset(&mut self) {
        self.state = self.initial_state.clone();
        self.history.clear();
        self.winner = None;
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    /// Mutable state access for `Ruleset::update_board` implementations
    pub fn state_mut(&mut self) -> &mut G::State {
        &mut self.state
    }

    pub fn initial_state(&self) -> &G::State {
        &self.initial_state
    }

    pub fn bounds(&self) -> &G::Bounds {
        &self.bounds
    }

    pub fn history(&self) -> &[Turn<G::Move>] {
        &self.history
    }

    /// Most recent history entry
    pub fn last_turn(&self) -> Option<&Turn<G::Move>> {
        self.history.last()
    }

    /// Append a move to the history
    pub fn log_move(&mut self, fingerprint: String, actor: &str, mv: G::Move) {
        let ply = self.history.len();
        self.history.push(Turn {
            ply,
            fingerprint,
            actor: actor.to_string(),
            mv,
        });
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    pub fn set_winner(&mut self, winner: Seat) {
        self.winner = Some(winner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::coloring::{Coloring, ColoringMove};
    use crate::games::takeaway::Takeaway;
    use crate::graph::Graph;

    #[test]
    fn test_new_board_matches_initial_state() {
        let rules = Takeaway::new(7, 2).unwrap();
        let board = Board::new(&rules);
        assert_eq!(*board.state(), 7);
        assert_eq!(*board.initial_state(), 7);
        assert_eq!(*board.bounds(), 2);
        assert!(board.history().is_empty());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_reset_restores_state_and_clears_history() {
        let rules = Takeaway::new(10, 2).unwrap();
        let mut board = Board::new(&rules);

        rules.update_board(&mut board, "alice", 2);
        rules.update_board(&mut board, "bob", 1);
        board.set_winner(Seat::Second);
        assert_eq!(*board.state(), 7);
        assert_eq!(board.history().len(), 2);

        board.reset();
        assert_eq!(board.state(), board.initial_state());
        assert!(board.history().is_empty());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_reset_is_deep_for_vertex_state() {
        let rules = Coloring::new(Graph::cycle(4), 2).unwrap();
        let mut board = Board::new(&rules);

        rules.update_board(&mut board, "alice", ColoringMove { vertex: 0, color: 1 });
        assert_eq!(board.state()[0].color, Some(1));
        assert_eq!(board.initial_state()[0].color, None);

        board.reset();
        assert_eq!(board.state(), board.initial_state());
        assert!(board.state().iter().all(|v| v.color.is_none()));
    }

    #[test]
    fn test_history_keys_are_unique_and_ordered() {
        let rules = Takeaway::new(4, 2).unwrap();
        let mut board = Board::new(&rules);
        rules.update_board(&mut board, "alice", 1);
        rules.update_board(&mut board, "bob", 1);
        rules.update_board(&mut board, "alice", 2);

        let plies: Vec<usize> = board.history().iter().map(|t| t.ply).collect();
        assert_eq!(plies, vec![0, 1, 2]);

        let fingerprints: Vec<&str> = board.history().iter().map(|t| t.fingerprint.as_str()).collect();
        assert_eq!(fingerprints, vec!["4", "3", "2"]);
        assert_eq!(board.last_turn().map(|t| t.actor.as_str()), Some("alice"));
    }
}
