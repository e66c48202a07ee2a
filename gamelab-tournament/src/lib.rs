//! Gamelab Tournament - Fitness through game playing
//!
//! This crate provides tournament infrastructure:
//! - Match play between two fixed players
//! - Elimination tournaments between two seat populations
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: Tournament::compete (orchestration)
//! - Level 2: play_match (phases)
//! - Level 3: opponent sampling, elite filtering (steps)
//! - Level 4: configuration

mod config;
mod match_play;
mod tournament;

pub use config::TournamentConfig;
pub use match_play::{play_match, MatchResult};
pub use tournament::{CompeteResult, Tournament};
