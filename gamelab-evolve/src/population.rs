//! Population generation and repopulation

use gamelab_core::{sort_by_fitness_desc, Evolvable, Player, Seat, Traits};
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;

use crate::crossover::spawn;
use crate::error::EvolveError;

/// Generate up to `n` players whose traits are independent random
/// permutations of `baseline`'s traits.
///
/// Trait-duplicates within the batch are discarded. After `10 * n`
/// consecutive duplicates the batch is returned short. Players are named
/// `"Player {seat} #0.{i}"`.
pub fn generate_population<S, R>(baseline: &S, n: usize, seat: Seat, rng: &mut R) -> Vec<Player<S>>
where
    S: Evolvable,
    R: Rng + ?Sized,
{
    generate_batch(baseline, n, seat, 0, 0, rng)
}

/// Refill `population` to `target` players by breeding.
///
/// Parents are two distinct players sampled uniformly. When fewer than two
/// players remain, `target / 2` freshly generated players are injected
/// first. Children are named `"Player {seat} #{generation}.{counter}"`. The result
/// is sorted by fitness, best first.
pub fn repopulate<S, R>(
    mut population: Vec<Player<S>>,
    baseline: &S,
    target: usize,
    seat: Seat,
    generation: u32,
    mutation_rate: f32,
    rng: &mut R,
) -> Result<Vec<Player<S>>, EvolveError>
where
    S: Evolvable,
    R: Rng + ?Sized,
{
    let mut counter: u32 = 0;

    while population.len() < target {
        if population.len() < 2 {
            tracing::warn!(
                "player {} population down to {}, injecting {} random players",
                seat,
                population.len(),
                target / 2
            );
            let injected = generate_batch(baseline, target / 2, seat, generation, counter + 1, rng);
            counter += injected.len() as u32;
            population.extend(injected);

            if population.is_empty() {
                return Err(EvolveError::EmptyPopulation { seat });
            }
            if population.len() >= target {
                break;
            }
        }

        counter += 1;
        let (a, b) = pick_parents(population.len(), rng);
        let child = spawn(
            &population[a],
            &population[b],
            &format!("Player {} #{}.{}", seat, generation, counter),
            &format!("Evolved Strategy #{}", counter),
            mutation_rate,
            rng,
        )?;
        population.push(child);
    }

    sort_by_fitness_desc(&mut population);
    Ok(population)
}

fn generate_batch<S, R>(
    baseline: &S,
    n: usize,
    seat: Seat,
    generation: u32,
    first_index: u32,
    rng: &mut R,
) -> Vec<Player<S>>
where
    S: Evolvable,
    R: Rng + ?Sized,
{
    let mut seen: FxHashSet<Traits> = FxHashSet::default();
    let mut players = Vec::with_capacity(n);
    let max_failures = 10 * n;
    let mut failures = 0;

    while players.len() < n {
        let traits = shuffled_traits(baseline.traits(), rng);
        if seen.contains(&traits) {
            failures += 1;
            if failures >= max_failures {
                tracing::warn!(
                    "gave up after {} duplicate strategies, generated {} of {} player {} strategies",
                    failures,
                    players.len(),
                    n,
                    seat
                );
                break;
            }
            continue;
        }
        failures = 0;

        let index = first_index + players.len() as u32;
        let strategy = baseline.with_traits(&format!("Generated Strategy #{}", index), traits.clone());
        seen.insert(traits);
        players.push(Player::new(format!("Player {} #{}.{}", seat, generation, index), strategy));
    }

    players
}

fn shuffled_traits<R: Rng + ?Sized>(traits: &Traits, rng: &mut R) -> Traits {
    traits
        .iter()
        .map(|(key, values)| {
            let mut values = values.clone();
            values.shuffle(rng);
            (key.clone(), values)
        })
        .collect()
}

/// Two distinct indices; a lone player is paired with itself
fn pick_parents<R: Rng + ?Sized>(len: usize, rng: &mut R) -> (usize, usize) {
    if len < 2 {
        return (0, 0);
    }
    let picks = rand::seq::index::sample(rng, len, 2);
    (picks.index(0), picks.index(1))
}
