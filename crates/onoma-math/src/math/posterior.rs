//! Discrete Bayes' rule over a fixed hypothesis set.
//!
//! Given unnormalized prior weights `w_i` and likelihoods `L_i = P(D|H_i)`:
//!
//! ```text
//! π_i   = w_i / Σ w
//! j_i   = π_i · L_i
//! P(D)  = Σ j
//! P(H_i|D) = j_i / P(D)
//! ```
//!
//! Prior weights are normalized first, so callers may pass weights that do
//! not sum to one (the usual case for independently adjusted inputs).
//! Inputs are rejected up front; nothing is clamped or corrected.

use serde::Serialize;
use thiserror::Error;

/// Number of hypotheses accepted by [`compute_posteriors`].
pub const HYPOTHESIS_COUNT: usize = 4;

/// Absolute tolerance on `Σ posterior == 1`.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Errors raised by the posterior calculator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PosteriorError {
    /// Malformed shape, negative or non-finite values, or zero-sum priors.
    #[error("invalid input for {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },
    /// Every joint weight is zero: no hypothesis has any support.
    #[error("degenerate result: every joint weight is zero, no hypothesis has support")]
    DegenerateResult,
}

impl PosteriorError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        PosteriorError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// True for [`PosteriorError::InvalidInput`].
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PosteriorError::InvalidInput { .. })
    }
}

/// Every intermediate quantity of one Bayes' rule application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosteriorBreakdown {
    /// Priors divided by their sum.
    pub normalized_priors: Vec<f64>,
    /// `normalized_prior[i] * likelihood[i]`.
    pub joint: Vec<f64>,
    /// Sum of the joint weights, P(D).
    pub evidence: f64,
    /// `joint[i] / evidence`.
    pub posteriors: Vec<f64>,
}

/// Normalize non-negative weights into a categorical distribution.
///
/// `field` names the input in error messages.
pub fn normalize_weights(weights: &[f64], field: &'static str) -> Result<Vec<f64>, PosteriorError> {
    if weights.is_empty() {
        return Err(PosteriorError::invalid(field, "must not be empty"));
    }
    for (i, &w) in weights.iter().enumerate() {
        if !w.is_finite() {
            return Err(PosteriorError::invalid(
                field,
                format!("[{}] must be finite, got {}", i, w),
            ));
        }
        if w < 0.0 {
            return Err(PosteriorError::invalid(
                field,
                format!("[{}] must be non-negative, got {}", i, w),
            ));
        }
    }

    let total: f64 = weights.iter().sum();
    if !total.is_finite() {
        return Err(PosteriorError::invalid(field, "sum overflows"));
    }
    if total <= 0.0 {
        return Err(PosteriorError::invalid(
            field,
            format!("sum must be positive, got {}", total),
        ));
    }

    Ok(weights.iter().map(|w| w / total).collect())
}

fn check_likelihoods(likelihoods: &[f64]) -> Result<(), PosteriorError> {
    for (i, &l) in likelihoods.iter().enumerate() {
        if !l.is_finite() {
            return Err(PosteriorError::invalid(
                "likelihoods",
                format!("[{}] must be finite, got {}", i, l),
            ));
        }
        if l < 0.0 {
            return Err(PosteriorError::invalid(
                "likelihoods",
                format!("[{}] must be non-negative, got {}", i, l),
            ));
        }
    }
    Ok(())
}

/// Apply Bayes' rule over any non-empty hypothesis set, keeping every
/// intermediate value.
pub fn posterior_breakdown(
    priors: &[f64],
    likelihoods: &[f64],
) -> Result<PosteriorBreakdown, PosteriorError> {
    if priors.len() != likelihoods.len() {
        return Err(PosteriorError::invalid(
            "likelihoods",
            format!(
                "expected {} values to match priors, got {}",
                priors.len(),
                likelihoods.len()
            ),
        ));
    }
    let normalized_priors = normalize_weights(priors, "priors")?;
    check_likelihoods(likelihoods)?;

    let joint: Vec<f64> = normalized_priors
        .iter()
        .zip(likelihoods)
        .map(|(p, l)| p * l)
        .collect();
    let evidence: f64 = joint.iter().sum();
    if evidence == 0.0 {
        return Err(PosteriorError::DegenerateResult);
    }
    // Only reachable with likelihoods near f64::MAX.
    if !evidence.is_finite() {
        return Err(PosteriorError::invalid("likelihoods", "joint weights overflow"));
    }

    let posteriors = joint.iter().map(|j| j / evidence).collect();
    Ok(PosteriorBreakdown {
        normalized_priors,
        joint,
        evidence,
        posteriors,
    })
}

/// Posterior probabilities over any non-empty hypothesis set.
///
/// `priors` and `likelihoods` must have the same, non-zero length.
pub fn compute_posteriors_n(priors: &[f64], likelihoods: &[f64]) -> Result<Vec<f64>, PosteriorError> {
    posterior_breakdown(priors, likelihoods).map(|b| b.posteriors)
}

/// Posterior probabilities for the four-hypothesis model.
///
/// Fails with [`PosteriorError::InvalidInput`] unless both inputs have
/// exactly [`HYPOTHESIS_COUNT`] elements, priors are non-negative with a
/// positive sum, and likelihoods are non-negative. A zero likelihood is
/// valid and yields an exact-zero posterior. Fails with
/// [`PosteriorError::DegenerateResult`] when no hypothesis has support.
pub fn compute_posteriors(
    priors: &[f64],
    likelihoods: &[f64],
) -> Result<[f64; HYPOTHESIS_COUNT], PosteriorError> {
    for (field, values) in [("priors", priors), ("likelihoods", likelihoods)] {
        if values.len() != HYPOTHESIS_COUNT {
            return Err(PosteriorError::invalid(
                field,
                format!(
                    "expected exactly {} values, got {}",
                    HYPOTHESIS_COUNT,
                    values.len()
                ),
            ));
        }
    }

    let posteriors = compute_posteriors_n(priors, likelihoods)?;
    let mut out = [0.0; HYPOTHESIS_COUNT];
    out.copy_from_slice(&posteriors);
    Ok(out)
}
