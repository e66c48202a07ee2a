//! Mutation operators for trait evolution

use rand::Rng;

/// With probability `rate`, swap two distinct positions of `values`.
///
/// Lists shorter than two are left alone. Returns whether a swap happened.
pub fn swap_mutation<R: Rng + ?Sized>(values: &mut [u32], rate: f32, rng: &mut R) -> bool {
    if values.len() < 2 || rng.gen::<f32>() >= rate {
        return false;
    }
    let picks = rand::seq::index::sample(rng, values.len(), 2);
    values.swap(picks.index(0), picks.index(1));
    true
}
