//! Gamelab Core - Two-player game framework
//!
//! This crate provides the pieces every game is built from:
//! - Rulesets (pure rules) and boards (passive state plus move log)
//! - Strategies and players with win/loss records
//! - A referee that validates proposals and resolves winners
//! - Games: graph coloring, toothpick takeaway, unbalanced rook

pub mod board;
pub mod error;
pub mod game;
pub mod games;
pub mod graph;
pub mod player;
pub mod referee;
pub mod ruleset;
pub mod strategy;

// Re-exports for convenient access
pub use board::{Board, Turn};
pub use error::{CoreError, Result};
pub use game::{Ending, Game, GameOutcome};
pub use graph::{Graph, EdgeList, Vertex};
pub use player::{sort_by_fitness_desc, Player};
pub use referee::{Referee, RefereeConfig};
pub use ruleset::{Ruleset, Seat};
pub use strategy::{Evolvable, Strategy, Traits};
