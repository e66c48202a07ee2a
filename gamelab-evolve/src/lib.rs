//! Gamelab Evolution - Genetic algorithm for game strategies
//!
//! This crate provides evolutionary algorithms:
//! - Population generation from a baseline strategy
//! - Selection by tournament elimination
//! - 1-cut ordered crossover and swap mutation
//! - Repopulation with a ratcheting survival threshold

mod algorithm;
mod config;
mod crossover;
mod error;
mod mutation;
mod population;

pub use algorithm::{EvolutionResult, GenerationStats, GeneticAlgorithm};
pub use config::EvolutionConfig;
pub use crossover::{ordered_crossover, spawn};
pub use error::EvolveError;
pub use mutation::swap_mutation;
pub use population::{generate_population, repopulate};
