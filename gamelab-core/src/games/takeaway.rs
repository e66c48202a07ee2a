//! Toothpick takeaway
//!
//! A pile of toothpicks; players alternate removing between 1 and
//! `max_take` of them. Whoever removes the last toothpick wins.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::board::Board;
use crate::error::{CoreError, Result};
use crate::ruleset::{Ruleset, Seat};
use crate::strategy::Strategy;

/// Takeaway ruleset: `toothpicks` to start, at most `max_take` per move
#[derive(Clone, Debug)]
pub struct Takeaway {
    toothpicks: u32,
    max_take: u32,
}

impl Takeaway {
    pub fn new(toothpicks: u32, max_take: u32) -> Result<Self> {
        if max_take == 0 {
            return Err(CoreError::ZeroTakeLimit);
        }
        Ok(Self {
            toothpicks,
            max_take,
        })
    }
}

impl Default for Takeaway {
    fn default() -> Self {
        Self {
            toothpicks: 10,
            max_take: 2,
        }
    }
}

impl Ruleset for Takeaway {
    type State = u32;
    type Move = u32;
    type Bounds = u32;

    fn name(&self) -> &str {
        "toothpick-takeaway"
    }

    fn initial_state(&self) -> u32 {
        self.toothpicks
    }

    fn bounds(&self) -> u32 {
        self.max_take
    }

    fn is_legal(&self, board: &Board<Self>, proposed: Option<&u32>) -> bool {
        match proposed {
            Some(&take) => take > 0 && take <= (*board.bounds()).min(*board.state()),
            None => false,
        }
    }

    fn is_game_over(&self, board: &Board<Self>) -> bool {
        *board.state() == 0
    }

    fn update_board(&self, board: &mut Board<Self>, actor: &str, take: u32) {
        let fingerprint = self.fingerprint(board.state());
        board.log_move(fingerprint, actor, take);
        *board.state_mut() -= take;
    }

    /// The player who took the last toothpick, i.e. the one not to move
    fn declare_winner(&self, _board: &Board<Self>, to_move: Seat) -> Seat {
        to_move.opponent()
    }

    fn fingerprint(&self, state: &u32) -> String {
        state.to_string()
    }
}

/// Takeaway strategies
#[derive(Clone, Debug)]
pub enum TakeawayStrategy {
    /// Uniform in `1..=max_take`, may overshoot the pile
    Random(ChaCha8Rng),
    TakeOne,
    TakeTwo,
    /// Remaining count -> take; `bias` when the table has no entry
    Lookup { table: BTreeMap<u32, u32>, bias: u32 },
}

impl TakeawayStrategy {
    pub fn random(seed: u64) -> Self {
        TakeawayStrategy::Random(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Lookup table that always leaves a multiple of `max_take + 1`
    /// where possible, for piles up to `up_to`
    pub fn optimal(max_take: u32, up_to: u32) -> Self {
        let table = (1..=up_to)
            .filter_map(|n| {
                // No multiple of max_take + 1 fits in u32: take the whole pile
                let take = max_take.checked_add(1).map_or(n, |period| n % period);
                (take > 0).then_some((n, take))
            })
            .collect();
        TakeawayStrategy::Lookup { table, bias: 1 }
    }
}

impl Strategy<Takeaway> for TakeawayStrategy {
    fn name(&self) -> &str {
        match self {
            TakeawayStrategy::Random(_) => "random",
            TakeawayStrategy::TakeOne => "take-one",
            TakeawayStrategy::TakeTwo => "take-two",
            TakeawayStrategy::Lookup { .. } => "lookup",
        }
    }

    fn propose(&mut self, board: &Board<Takeaway>) -> Option<u32> {
        match self {
            TakeawayStrategy::Random(rng) => Some(rng.gen_range(1..=(*board.bounds()).max(1))),
            TakeawayStrategy::TakeOne => Some(1),
            TakeawayStrategy::TakeTwo => Some(2),
            TakeawayStrategy::Lookup { table, bias } => {
                Some(table.get(board.state()).copied().unwrap_or(*bias))
            }
        }
    }
}
