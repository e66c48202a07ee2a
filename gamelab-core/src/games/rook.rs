//! Unbalanced rook
//!
//! A rook starts in the top-left corner of a `down` x `right` board.
//! Players alternate moving it any number of tiles, either down or right,
//! never past the edge. Whoever lands it on the far corner wins.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{CoreError, Result};
use crate::ruleset::{Ruleset, Seat};
use crate::strategy::Strategy;

/// Rook coordinates, also used for the board extents
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RookPosition {
    pub down: u32,
    pub right: u32,
}

impl RookPosition {
    pub fn new(down: u32, right: u32) -> Self {
        Self { down, right }
    }

    fn along(&self, direction: Direction) -> u32 {
        match direction {
            Direction::Down => self.down,
            Direction::Right => self.right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RookMove {
    pub direction: Direction,
    pub tiles: u32,
}

/// Rook ruleset; the target corner is `(down, right)`
#[derive(Clone, Debug)]
pub struct Rook {
    corner: RookPosition,
}

impl Rook {
    pub fn new(down: u32, right: u32) -> Result<Self> {
        if down == 0 && right == 0 {
            return Err(CoreError::EmptyRookBoard);
        }
        Ok(Self {
            corner: RookPosition::new(down, right),
        })
    }
}

impl Ruleset for Rook {
    type State = RookPosition;
    type Move = RookMove;
    type Bounds = RookPosition;

    fn name(&self) -> &str {
        "unbalanced-rook"
    }

    fn initial_state(&self) -> RookPosition {
        RookPosition::default()
    }

    fn bounds(&self) -> RookPosition {
        self.corner
    }

    fn is_legal(&self, board: &Board<Self>, proposed: Option<&RookMove>) -> bool {
        match proposed {
            Some(mv) if mv.tiles >= 1 => {
                let at = board.state().along(mv.direction);
                let limit = board.bounds().along(mv.direction);
                at.saturating_add(mv.tiles) <= limit
            }
            _ => false,
        }
    }

    fn is_game_over(&self, board: &Board<Self>) -> bool {
        board.state() == board.bounds()
    }

    fn update_board(&self, board: &mut Board<Self>, actor: &str, mv: RookMove) {
        let fingerprint = self.fingerprint(board.state());
        board.log_move(fingerprint, actor, mv);
        let state = board.state_mut();
        match mv.direction {
            Direction::Down => state.down += mv.tiles,
            Direction::Right => state.right += mv.tiles,
        }
    }

    fn declare_winner(&self, _board: &Board<Self>, to_move: Seat) -> Seat {
        to_move.opponent()
    }

    fn fingerprint(&self, state: &RookPosition) -> String {
        format!("{},{}", state.down, state.right)
    }
}

/// Rook strategies
#[derive(Clone, Debug)]
pub enum RookStrategy {
    /// Random direction, `0..=remaining + 1` tiles. May overshoot.
    Random(ChaCha8Rng),
    /// Move back onto the diagonal when off it, otherwise step one tile
    Diagonal,
}

impl RookStrategy {
    pub fn random(seed: u64) -> Self {
        RookStrategy::Random(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Strategy<Rook> for RookStrategy {
    fn name(&self) -> &str {
        match self {
            RookStrategy::Random(_) => "random",
            RookStrategy::Diagonal => "diagonal",
        }
    }

    fn propose(&mut self, board: &Board<Rook>) -> Option<RookMove> {
        let at = *board.state();
        let corner = *board.bounds();

        match self {
            RookStrategy::Random(rng) => {
                let direction = if rng.gen_bool(0.5) {
                    Direction::Down
                } else {
                    Direction::Right
                };
                let remaining = corner.along(direction).saturating_sub(at.along(direction));
                Some(RookMove {
                    direction,
                    tiles: rng.gen_range(0..=remaining.saturating_add(1)),
                })
            }
            RookStrategy::Diagonal => {
                if at.down < at.right && at.right <= corner.down {
                    return Some(RookMove {
                        direction: Direction::Down,
                        tiles: at.right - at.down,
                    });
                }
                if at.right < at.down && at.down <= corner.right {
                    return Some(RookMove {
                        direction: Direction::Right,
                        tiles: at.down - at.right,
                    });
                }
                if at.down < corner.down {
                    Some(RookMove {
                        direction: Direction::Down,
                        tiles: 1,
                    })
                } else if at.right < corner.right {
                    Some(RookMove {
                        direction: Direction::Right,
                        tiles: 1,
                    })
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(tiles: u32) -> RookMove {
        RookMove {
            direction: Direction::Down,
            tiles,
        }
    }

    fn right(tiles: u32) -> RookMove {
        RookMove {
            direction: Direction::Right,
            tiles,
        }
    }

    #[test]
    fn test_empty_board_rejected() {
        assert!(matches!(Rook::new(0, 0), Err(CoreError::EmptyRookBoard)));
        assert!(Rook::new(0, 3).is_ok());
    }

    #[test]
    fn test_is_legal() {
        let rules = Rook::new(3, 5).unwrap();
        let board = Board::new(&rules);
        assert!(!rules.is_legal(&board, None));
        assert!(!rules.is_legal(&board, Some(&down(0))));
        assert!(rules.is_legal(&board, Some(&down(3))));
        assert!(!rules.is_legal(&board, Some(&down(4))));
        assert!(rules.is_legal(&board, Some(&right(5))));
        assert!(!rules.is_legal(&board, Some(&right(6))));
    }

    #[test]
    fn test_update_fingerprint_and_game_over() {
        let rules = Rook::new(2, 2).unwrap();
        let mut board = Board::new(&rules);
        rules.update_board(&mut board, "a", down(2));
        assert!(!rules.is_game_over(&board));
        rules.update_board(&mut board, "b", right(2));
        assert!(rules.is_game_over(&board));

        let fingerprints: Vec<&str> = board.history().iter().map(|t| t.fingerprint.as_str()).collect();
        assert_eq!(fingerprints, vec!["0,0", "2,0"]);
        assert_eq!(rules.declare_winner(&board, Seat::First), Seat::Second);
    }

    #[test]
    fn test_diagonal_restores_diagonal() {
        let rules = Rook::new(5, 5).unwrap();
        let mut strategy = RookStrategy::Diagonal;

        let board = Board::<Rook>::from_state(RookPosition::new(1, 4), rules.bounds());
        assert_eq!(strategy.propose(&board), Some(down(3)));

        let board = Board::<Rook>::from_state(RookPosition::new(3, 3), rules.bounds());
        assert_eq!(strategy.propose(&board), Some(down(1)));

        let board = Board::<Rook>::from_state(RookPosition::new(5, 5), rules.bounds());
        assert_eq!(strategy.propose(&board), None);
    }

    #[test]
    fn test_diagonal_on_rectangle_stays_legal() {
        let rules = Rook::new(2, 4).unwrap();
        let mut board = Board::new(&rules);
        let mut strategy = RookStrategy::Diagonal;
        while let Some(mv) = strategy.propose(&board) {
            assert!(rules.is_legal(&board, Some(&mv)), "{:?} at {:?}", mv, board.state());
            rules.update_board(&mut board, "p", mv);
        }
        assert!(rules.is_game_over(&board));
    }

    #[test]
    fn test_random_tiles_within_overshoot() {
        let rules = Rook::new(4, 4).unwrap();
        let board = Board::new(&rules);
        let mut strategy = RookStrategy::random(2);
        for _ in 0..100 {
            let mv = strategy.propose(&board).unwrap();
            assert!(mv.tiles <= 5);
        }
    }

    #[test]
    fn test_random_on_widest_board() {
        let rules = Rook::new(u32::MAX, u32::MAX).unwrap();
        let board = Board::new(&rules);
        let mut strategy = RookStrategy::random(1);
        for _ in 0..20 {
            assert!(strategy.propose(&board).is_some());
        }

        let board = Board::<Rook>::from_state(RookPosition::new(0, u32::MAX), rules.bounds());
        for _ in 0..20 {
            let mv = strategy.propose(&board).unwrap();
            if mv.direction == Direction::Right {
                assert!(mv.tiles <= 1);
            }
        }
    }
}
