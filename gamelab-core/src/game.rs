//! Game - one playthrough between two players

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{CoreError, Result};
use crate::player::Player;
use crate::referee::Referee;
use crate::ruleset::{Ruleset, Seat};
use crate::strategy::Strategy;

/// How a game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    /// The ruleset reached a terminal state
    Terminal,
    /// The player to move produced no legal move
    Forfeit,
}

/// Outcome of a single game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: Seat,
    pub ending: Ending,
    /// Moves applied to the board
    pub turns: usize,
}

impl GameOutcome {
    pub fn is_forfeit(&self) -> bool {
        self.ending == Ending::Forfeit
    }
}

/// A game between `first` (moves first) and `second`.
///
/// The board is reset at the start of every `play()`, so one game
/// (or one board) can be replayed any number of times.
pub struct Game<'a, G: Ruleset, A, B> {
    referee: &'a Referee<G>,
    board: &'a mut Board<G>,
    first: &'a mut Player<A>,
    second: &'a mut Player<B>,
}

impl<'a, G, A, B> Game<'a, G, A, B>
where
    G: Ruleset,
    A: Strategy<G>,
    B: Strategy<G>,
{
    pub fn new(
        referee: &'a Referee<G>,
        board: &'a mut Board<G>,
        first: &'a mut Player<A>,
        second: &'a mut Player<B>,
    ) -> Result<Self> {
        if first.name == second.name {
            return Err(CoreError::DuplicatePlayerName(first.name.clone()));
        }
        Ok(Self {
            referee,
            board,
            first,
            second,
        })
    }

    /// Play until a terminal state or a forfeit
    pub fn play(&mut self) -> GameOutcome {
        self.board.reset();
        let mut to_move = Seat::First;
        let mut turns = 0;

        loop {
            if self.referee.is_game_over(self.board) {
                let winner = self.referee.declare_winner(
                    &mut *self.board,
                    to_move,
                    &mut *self.first,
                    &mut *self.second,
                );
                return self.finish(winner, Ending::Terminal, turns);
            }

            let proposal = match to_move {
                Seat::First => self.referee.ask_for_move(&mut *self.first, &*self.board),
                Seat::Second => self.referee.ask_for_move(&mut *self.second, &*self.board),
            };

            match proposal {
                Some(mv) => {
                    let actor = match to_move {
                        Seat::First => &self.first.name,
                        Seat::Second => &self.second.name,
                    };
                    self.referee.update_board(&mut *self.board, actor, mv);
                    turns += 1;
                    to_move = to_move.opponent();
                }
                None => {
                    let winner = to_move.opponent();
                    self.referee
                        .award(&mut *self.board, winner, &mut *self.first, &mut *self.second);
                    return self.finish(winner, Ending::Forfeit, turns);
                }
            }
        }
    }

    pub fn board(&self) -> &Board<G> {
        self.board
    }

    fn finish(&self, winner: Seat, ending: Ending, turns: usize) -> GameOutcome {
        tracing::debug!(
            "{} vs {}: seat {} wins ({:?}) after {} turns",
            self.first.name,
            self.second.name,
            winner,
            ending,
            turns
        );
        GameOutcome {
            winner,
            ending,
            turns,
        }
    }
}
