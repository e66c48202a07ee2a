//! Evolution errors

use gamelab_core::{CoreError, Seat};

#[derive(Debug, thiserror::Error)]
pub enum EvolveError {
    #[error("invalid evolution config: {0}")]
    InvalidConfig(String),

    #[error("player {seat} population is empty and could not be regenerated")]
    EmptyPopulation { seat: Seat },

    #[error("parents disagree on trait {trait_name:?}")]
    TraitMismatch { trait_name: String },

    #[error(transparent)]
    Game(#[from] CoreError),
}
