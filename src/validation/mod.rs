// src/validation/mod.rs

//! Normalisation checks for state vectors and estimated probability vectors.

use crate::core::constants::NORM_TOLERANCE;
use crate::core::{GroverError, Result, StateVector};

/// Checks that the state vector is normalised (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0; defaults to `NORM_TOLERANCE`.
///
/// # Returns
/// * `Ok(())` if normalised within tolerance.
/// * `Err(GroverError::Incoherence)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(GroverError::Incoherence {
            message: format!(
                "sum(|c_i|^2) = {} deviates from 1 by more than {}",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that every entry of `probabilities` is a finite value in `[0, 1]`
/// and that the entries sum to 1.0 within `tolerance`.
pub fn check_probability_vector(probabilities: &[f64], tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    if let Some(bad) = probabilities.iter().find(|p| !p.is_finite() || **p < 0.0 || **p > 1.0) {
        return Err(GroverError::Incoherence {
            message: format!("probability {} outside [0, 1]", bad),
        });
    }
    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > effective_tolerance {
        return Err(GroverError::Incoherence {
            message: format!("probabilities sum to {}, not 1", total),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_normalized_state_passes() {
        let state = StateVector::new(
            vec![Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(0.0, -FRAC_1_SQRT_2)],
            1,
        );
        assert!(check_normalization(&state, None).is_ok());
    }

    #[test]
    fn test_unnormalized_state_fails() {
        let state = StateVector::new(vec![Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)], 1);
        assert!(matches!(
            check_normalization(&state, None),
            Err(GroverError::Incoherence { .. })
        ));
    }

    #[test]
    fn test_probability_vector_checks() {
        assert!(check_probability_vector(&[0.25, 0.25, 0.5], None).is_ok());
        assert!(check_probability_vector(&[0.5, 0.4], None).is_err());
        assert!(check_probability_vector(&[f64::NAN, 1.0], None).is_err());
    }
}
