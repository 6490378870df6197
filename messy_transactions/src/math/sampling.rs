//! Random-draw primitives shared by the sampler and the corruption rules.

use crate::GeneratorError;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::index;
use rand::Rng;

/// Draws `n` indices into `weights` with replacement, proportionally to weight.
pub fn weighted_indices<R: Rng + ?Sized>(
    rng: &mut R,
    weights: &[f64],
    n: usize,
) -> Result<Vec<usize>, GeneratorError> {
    let dist = WeightedIndex::new(weights)
        .map_err(|e| GeneratorError::InvalidConfig(format!("invalid sampling weights: {}", e)))?;
    Ok((0..n).map(|_| dist.sample(rng)).collect())
}

/// Draws `n` values uniformly (with replacement) from `values`.
pub fn choose_uniform<R: Rng + ?Sized, T: Clone>(
    rng: &mut R,
    values: &[T],
    n: usize,
) -> Result<Vec<T>, GeneratorError> {
    if values.is_empty() && n > 0 {
        return Err(GeneratorError::InvalidConfig(
            "cannot choose from an empty set".to_string(),
        ));
    }
    Ok((0..n)
        .map(|_| values[rng.gen_range(0..values.len())].clone())
        .collect())
}

/// Draws `n` values from `choices`, each `(value, probability)`.
pub fn choose_weighted<R: Rng + ?Sized, T: Clone>(
    rng: &mut R,
    choices: &[(T, f64)],
    n: usize,
) -> Result<Vec<T>, GeneratorError> {
    let weights: Vec<f64> = choices.iter().map(|(_, w)| *w).collect();
    let picks = weighted_indices(rng, &weights, n)?;
    Ok(picks.into_iter().map(|i| choices[i].0.clone()).collect())
}

/// Number of rows a fractional sample of `height` rows selects. Ties round to even.
pub fn fraction_count(fraction: f64, height: usize) -> usize {
    (fraction * height as f64).round_ties_even() as usize
}

/// Picks `amount` distinct row positions out of `height`, in draw order.
///
/// An `amount` larger than the table selects every row.
pub fn sample_rows<R: Rng + ?Sized>(rng: &mut R, height: usize, amount: usize) -> Vec<usize> {
    index::sample(rng, height, amount.min(height)).into_vec()
}

/// Picks exactly `amount` row positions out of `height`.
///
/// Positions are distinct when the table is large enough; otherwise rows are
/// drawn with replacement so the count is still honoured.
pub fn sample_rows_exact<R: Rng + ?Sized>(
    rng: &mut R,
    height: usize,
    amount: usize,
) -> Vec<usize> {
    if amount <= height {
        sample_rows(rng, height, amount)
    } else if height == 0 {
        Vec::new()
    } else {
        (0..amount).map(|_| rng.gen_range(0..height)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn fraction_count_rounds() {
        assert_eq!(fraction_count(0.03, 10_000), 300);
        assert_eq!(fraction_count(0.03, 10), 0);
        assert_eq!(fraction_count(0.05, 30), 2);
        assert_eq!(fraction_count(0.05, 10), 0);
        assert_eq!(fraction_count(0.25, 10), 2);
        assert_eq!(fraction_count(0.02, 2_000_000), 40_000);
    }

    #[test]
    fn sampled_rows_are_distinct() {
        let mut rng = StdRng::seed_from_u64(1);
        let rows = sample_rows(&mut rng, 1000, 300);
        assert_eq!(rows.len(), 300);
        assert_eq!(rows.iter().collect::<HashSet<_>>().len(), 300);
        assert!(rows.iter().all(|&r| r < 1000));
    }

    #[test]
    fn oversized_sample_takes_every_row() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut rows = sample_rows(&mut rng, 10, 500);
        rows.sort_unstable();
        assert_eq!(rows, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn exact_sample_honours_count_on_small_tables() {
        let mut rng = StdRng::seed_from_u64(3);
        let rows = sample_rows_exact(&mut rng, 10, 1000);
        assert_eq!(rows.len(), 1000);
        assert!(rows.iter().all(|&r| r < 10));
        assert!(sample_rows_exact(&mut rng, 0, 5).is_empty());
    }

    #[test]
    fn zero_weight_is_never_drawn() {
        let mut rng = StdRng::seed_from_u64(4);
        let picks = weighted_indices(&mut rng, &[1.0, 0.0, 3.0], 5000).unwrap();
        assert!(picks.iter().all(|&i| i != 1));
        let share_of_last = picks.iter().filter(|&&i| i == 2).count() as f64 / 5000.0;
        assert!((share_of_last - 0.75).abs() < 0.03);
    }

    #[test]
    fn invalid_weights_are_reported() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(weighted_indices(&mut rng, &[], 1).is_err());
        assert!(weighted_indices(&mut rng, &[0.0, 0.0], 1).is_err());
        assert!(choose_uniform::<_, i32>(&mut rng, &[], 1).is_err());
    }

    #[test]
    fn seeded_draws_repeat() {
        let draw = || {
            let mut rng = StdRng::seed_from_u64(69);
            choose_weighted(&mut rng, &[(1, 0.8), (2, 0.15), (3, 0.05)], 50).unwrap()
        };
        assert_eq!(draw(), draw());
    }
}
