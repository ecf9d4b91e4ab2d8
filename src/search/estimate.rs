// src/search/estimate.rs

use crate::core::{GroverError, Result};
use crate::simulation::MeasurementCounts;

/// Normalises `counts` into a probability vector aligned one-to-one with
/// `keys`.
///
/// Each key is looked up in the histogram (0 when never observed) and every
/// entry is divided by the sum of the looked-up counts. Keys may repeat; each
/// occurrence contributes its count to the denominator, so the result always
/// sums to 1.0.
///
/// # Errors
/// `DegenerateProbability` when no key was observed (including when `keys`
/// is empty), instead of dividing by zero.
pub fn estimate(counts: &MeasurementCounts, keys: &[u64]) -> Result<Vec<f64>> {
    let looked_up: Vec<u64> = keys.iter().map(|&key| counts.get(key)).collect();
    let total: u64 = looked_up.iter().sum();
    if total == 0 {
        return Err(GroverError::DegenerateProbability { keys: keys.len() });
    }
    let total = total as f64;
    Ok(looked_up.into_iter().map(|count| count as f64 / total).collect())
}
