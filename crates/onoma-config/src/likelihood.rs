//! Default likelihoods and recommended input ranges.
//!
//! The calculator accepts any non-negative likelihood, but values outside
//! the ranges below are unusual for this model and get reported as
//! warnings. Warnings never block a computation.

use onoma_common::{Hypothesis, HypothesisScores};
use serde::Serialize;

/// Default P(D|H) for (Mg, O, Sp, R).
pub const DEFAULT_LIKELIHOODS: HypothesisScores = HypothesisScores::new(0.75, 0.10, 0.07, 0.02);

/// Closed interval of recommended values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecommendedRange {
    pub min: f64,
    pub max: f64,
}

impl RecommendedRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Recommended range for a prior weight.
    pub fn prior() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Recommended range for P(D|hypothesis).
    pub fn likelihood(hypothesis: Hypothesis) -> Self {
        match hypothesis {
            Hypothesis::Mg => Self::new(0.1, 1.0),
            Hypothesis::O | Hypothesis::Sp | Hypothesis::R => Self::new(0.01, 0.5),
        }
    }
}

/// A value outside its recommended range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeWarning {
    /// e.g. `priors.mg` or `likelihoods.sp`
    pub field: String,
    pub value: f64,
    pub range: RecommendedRange,
}

impl std::fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {} is outside the recommended range [{}, {}]",
            self.field, self.value, self.range.min, self.range.max
        )
    }
}

/// Collect range warnings for a prior/likelihood pair.
pub fn check_ranges(priors: &HypothesisScores, likelihoods: &HypothesisScores) -> Vec<RangeWarning> {
    let mut warnings = Vec::new();
    for hypothesis in Hypothesis::ALL {
        let key = hypothesis.code().to_lowercase();

        let prior = priors.get(hypothesis);
        let range = RecommendedRange::prior();
        if !range.contains(prior) {
            warnings.push(RangeWarning {
                field: format!("priors.{}", key),
                value: prior,
                range,
            });
        }

        let likelihood = likelihoods.get(hypothesis);
        let range = RecommendedRange::likelihood(hypothesis);
        if !range.contains(likelihood) {
            warnings.push(RangeWarning {
                field: format!("likelihoods.{}", key),
                value: likelihood,
                range,
            });
        }
    }
    warnings
}
