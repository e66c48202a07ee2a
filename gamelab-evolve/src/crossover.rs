//! Crossover operators for trait evolution
//!
//! Children inherit a prefix of each trait from the first parent and
//! the rest, in order, from the second.

use gamelab_core::{Evolvable, Player, Traits};
use rand::Rng;

use crate::error::EvolveError;
use crate::mutation::swap_mutation;

/// 1-cut ordered crossover.
///
/// Takes `a[..cut]` for a uniform `cut` in `0..a.len()`, then every
/// value of `b` not already in that prefix, keeping `b`'s order. When
/// `a` and `b` are permutations of the same values, so is the child.
pub fn ordered_crossover<R: Rng + ?Sized>(a: &[u32], b: &[u32], rng: &mut R) -> Vec<u32> {
    let cut = if a.is_empty() { 0 } else { rng.gen_range(0..a.len()) };
    let prefix = &a[..cut];

    let mut child = Vec::with_capacity(b.len().max(cut));
    child.extend_from_slice(prefix);
    child.extend(b.iter().filter(|v| !prefix.contains(v)));
    child
}

/// Breed a child player from two parents.
///
/// Every trait goes through `ordered_crossover` and then `swap_mutation`.
/// The child strategy is built with `with_traits`, so neither parent is
/// touched. The child's generation is one past the older parent's.
pub fn spawn<S, R>(
    parent1: &Player<S>,
    parent2: &Player<S>,
    child_name: &str,
    strategy_name: &str,
    mutation_rate: f32,
    rng: &mut R,
) -> Result<Player<S>, EvolveError>
where
    S: Evolvable,
    R: Rng + ?Sized,
{
    let first = parent1.strategy.traits();
    let second = parent2.strategy.traits();

    if let Some(key) = second.keys().find(|k| !first.contains_key(*k)) {
        return Err(EvolveError::TraitMismatch { trait_name: key.clone() });
    }

    let mut traits = Traits::new();
    for (key, values) in first {
        let Some(other) = second.get(key) else {
            return Err(EvolveError::TraitMismatch { trait_name: key.clone() });
        };
        let mut child = ordered_crossover(values, other, rng);
        swap_mutation(&mut child, mutation_rate, rng);
        traits.insert(key.clone(), child);
    }

    let strategy = parent1.strategy.with_traits(strategy_name, traits);
    let generation = parent1.generation.max(parent2.generation) + 1;
    Ok(Player::new(child_name, strategy).with_generation(generation))
}
