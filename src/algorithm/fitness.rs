//! Similarity between equally shaped binary grids

use crate::io::error::{EvolutionError, Result};
use crate::spatial::BinaryGrid;

/// Sign convention for the value the evolution loop maximizes
///
/// Both conventions are maximized with the same strict-improvement acceptance
/// and `>=` termination test. Only `Agreement` moves the candidate toward the
/// target; maximizing the mismatch fraction under `Disagreement` drives the
/// candidate toward the target's inverse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FitnessConvention {
    /// Fraction of pixels that agree with the target
    #[default]
    Agreement,
    /// Fraction of pixels that differ from the target
    Disagreement,
}

impl FitnessConvention {
    /// Evaluate `candidate` against `target` under this convention
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the grids differ in shape
    pub fn evaluate(self, candidate: &BinaryGrid, target: &BinaryGrid) -> Result<f64> {
        match self {
            Self::Agreement => score(candidate, target),
            Self::Disagreement => mismatch_ratio(candidate, target),
        }
    }
}

/// Fraction of pixels on which `candidate` agrees with `target`
///
/// Returns a value in `[0.0, 1.0]`: exactly `1.0` for identical grids and
/// `0.0` when every pixel differs. Grids without pixels score `1.0`.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the grids differ in shape
pub fn score(candidate: &BinaryGrid, target: &BinaryGrid) -> Result<f64> {
    let mismatches = count_mismatches(candidate, target)?;
    let total = target.len();
    if total == 0 {
        return Ok(1.0);
    }
    Ok((total - mismatches) as f64 / total as f64)
}

/// Fraction of pixels on which `candidate` differs from `target`
///
/// # Errors
///
/// Returns `DimensionMismatch` if the grids differ in shape
pub fn mismatch_ratio(candidate: &BinaryGrid, target: &BinaryGrid) -> Result<f64> {
    let mismatches = count_mismatches(candidate, target)?;
    let total = target.len();
    if total == 0 {
        return Ok(0.0);
    }
    Ok(mismatches as f64 / total as f64)
}

fn count_mismatches(candidate: &BinaryGrid, target: &BinaryGrid) -> Result<usize> {
    if !candidate.same_shape(target) {
        return Err(EvolutionError::DimensionMismatch {
            expected: target.dimensions(),
            found: candidate.dimensions(),
        });
    }
    target.mismatch_count(candidate)
}
