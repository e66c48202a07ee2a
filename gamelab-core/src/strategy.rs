//! Strategy - move-selection policies

use std::collections::BTreeMap;

use crate::board::Board;
use crate::ruleset::Ruleset;

/// Ordered trait data: trait name -> ordered values
/// (e.g. `"vertices" -> [2, 0, 1]`, `"colors" -> [1, 2]`)
pub type Traits = BTreeMap<String, Vec<u32>>;

/// A move-selection policy for game `G`.
///
/// Strategies read the board and never mutate it. `None` means the
/// strategy has no move to offer, which the referee treats as forfeiture.
pub trait Strategy<G: Ruleset> {
    fn name(&self) -> &str;

    fn propose(&mut self, board: &Board<G>) -> Option<G::Move>;
}

impl<G: Ruleset, S: Strategy<G> + ?Sized> Strategy<G> for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn propose(&mut self, board: &Board<G>) -> Option<G::Move> {
        (**self).propose(board)
    }
}

/// Strategies parameterized by ordered traits that can be bred.
///
/// `with_traits` clones; parents are never changed in place.
pub trait Evolvable: Sized {
    fn traits(&self) -> &Traits;

    /// A copy of this strategy with a new name and trait data
    fn with_traits(&self, name: &str, traits: Traits) -> Self;

    /// Deep equality of trait data
    fn same_traits(&self, other: &Self) -> bool {
        self.traits() == other.traits()
    }
}
