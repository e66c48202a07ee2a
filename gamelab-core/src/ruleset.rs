//! Ruleset - the pure rules of a two-player game

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::board::Board;

/// Seat at the table. `First` always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn opponent(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// 1 for the first mover, 2 for the second
    pub fn number(self) -> u8 {
        match self {
            Seat::First => 1,
            Seat::Second => 2,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Rules of a specific game.
///
/// Every function here is a pure decision over the board, except
/// `update_board`, which is the only place a board's state changes.
/// Any game implementing this trait plugs into `Referee`, `Game` and the
/// tournament/evolution layers unchanged.
pub trait Ruleset: Sized {
    /// Board state (vertex list, toothpick count, rook position, ...)
    type State: Clone + Debug + PartialEq;
    /// A single proposed move
    type Move: Clone + Debug + PartialEq + Eq + Hash;
    /// Legal move limits (color count, max take, board extents, ...)
    type Bounds: Clone + Debug;

    /// Human-readable game name
    fn name(&self) -> &str;

    /// State every board of this game starts from
    fn initial_state(&self) -> Self::State;

    /// Move limits
    fn bounds(&self) -> Self::Bounds;

    /// Whether `proposed` may be applied to `board`. A missing move is never legal.
    fn is_legal(&self, board: &Board<Self>, proposed: Option<&Self::Move>) -> bool;

    /// Whether the board is in a terminal state
    fn is_game_over(&self, board: &Board<Self>) -> bool;

    /// Apply a validated move and log it under the pre-move fingerprint
    fn update_board(&self, board: &mut Board<Self>, actor: &str, mv: Self::Move);

    /// Resolve the winner of a terminal board.
    ///
    /// `to_move` is the seat that would move next, so "last mover wins"
    /// games answer `to_move.opponent()`.
    fn declare_winner(&self, board: &Board<Self>, to_move: Seat) -> Seat;

    /// Compact fingerprint of a state, used to key history entries
    fn fingerprint(&self, state: &Self::State) -> String {
        format!("{:?}", state)
    }
}
