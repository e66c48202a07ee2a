//! Concrete games: rulesets plus their stock strategies

pub mod coloring;
pub mod rook;
pub mod takeaway;

pub use coloring::{Coloring, ColoringMove, GreedyColoring, OrderedColoring, RandomColoring};
pub use rook::{Direction, Rook, RookMove, RookPosition, RookStrategy};
pub use takeaway::{Takeaway, TakeawayStrategy};
