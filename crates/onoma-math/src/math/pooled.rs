//! Pooled two-hypothesis approximation.
//!
//! Collapses the alternatives to a single hypothesis with prior `1 - p`
//! and one shared likelihood. This is a coarser model than the full
//! calculator in [`crate::math::posterior`]: it ignores how the remaining
//! prior mass is split among the alternatives. It exists for quick
//! sensitivity sweeps and must not be used in place of the exact result.

/// Shared likelihood assumed for the pooled alternatives (a rough average of
/// P(D|O), P(D|Sp) and P(D|R)).
pub const POOLED_ALT_LIKELIHOOD: f64 = 0.08;

/// Posterior of the focal hypothesis under the pooled approximation:
///
/// ```text
/// p·L / (p·L + (1 - p)·L_alt)
/// ```
///
/// Returns `None` if `prior` is outside [0, 1], a likelihood is negative or
/// non-finite, or the denominator is zero.
pub fn pooled_binary_posterior(prior: f64, likelihood: f64, pooled_alt_likelihood: f64) -> Option<f64> {
    if !(0.0..=1.0).contains(&prior) {
        return None;
    }
    if !likelihood.is_finite() || likelihood < 0.0 {
        return None;
    }
    if !pooled_alt_likelihood.is_finite() || pooled_alt_likelihood < 0.0 {
        return None;
    }

    let focal = prior * likelihood;
    let rest = (1.0 - prior) * pooled_alt_likelihood;
    let denom = focal + rest;
    if denom <= 0.0 {
        return None;
    }
    Some(focal / denom)
}
