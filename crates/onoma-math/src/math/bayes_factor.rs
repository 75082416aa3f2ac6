//! Bayes factor utilities for comparing two hypotheses.
//!
//! A Bayes factor BF_{a,b} = P(D|H_a) / P(D|H_b) measures how much the
//! observed data shifts the odds from H_b towards H_a, independent of the
//! priors. In log domain: log_bf = ln P(D|H_a) - ln P(D|H_b).
//!
//! This module provides:
//! - Log Bayes factors straight from likelihoods (zero-aware)
//! - Overflow-safe conversion back to a ratio
//! - Evidence in bits for MDL interpretation
//! - Evidence strength labeling (Jeffreys scale)

use serde::Serialize;

/// Maximum log Bayes factor before clamping to avoid overflow.
/// exp(709) ≈ 8.2e307 is near f64::MAX.
pub const LOG_BF_MAX: f64 = 700.0;

/// Minimum log Bayes factor before clamping to avoid underflow.
pub const LOG_BF_MIN: f64 = -700.0;

/// Log Bayes factor of hypothesis `a` over hypothesis `b`.
///
/// - `+inf` when only `b` has zero likelihood
/// - `-inf` when only `a` has zero likelihood
/// - NaN when both are zero, negative or NaN
pub fn log_bayes_factor(likelihood_a: f64, likelihood_b: f64) -> f64 {
    if likelihood_a.is_nan() || likelihood_b.is_nan() {
        return f64::NAN;
    }
    if likelihood_a < 0.0 || likelihood_b < 0.0 {
        return f64::NAN;
    }
    match (likelihood_a == 0.0, likelihood_b == 0.0) {
        (true, true) => f64::NAN,
        (false, true) => f64::INFINITY,
        (true, false) => f64::NEG_INFINITY,
        (false, false) => likelihood_a.ln() - likelihood_b.ln(),
    }
}

/// Convert a log Bayes factor back to a ratio with overflow-safe handling.
///
/// # Overflow handling
/// - Clamps log_bf to [LOG_BF_MIN, LOG_BF_MAX] before exponentiation
/// - Returns 0.0 for log_bf = -inf
/// - Returns f64::MAX for log_bf = +inf (capped)
pub fn bayes_factor_from_log(log_bf: f64) -> f64 {
    if log_bf.is_nan() {
        return f64::NAN;
    }
    if log_bf == f64::NEG_INFINITY {
        return 0.0;
    }
    if log_bf == f64::INFINITY {
        return f64::MAX;
    }

    let clamped = log_bf.clamp(LOG_BF_MIN, LOG_BF_MAX);
    clamped.exp()
}

/// Convert log Bayes factor to evidence in bits (MDL interpretation).
///
/// Positive values: H_a compresses the data better by that many bits.
/// Returns NaN if input is NaN.
pub fn delta_bits(log_bf: f64) -> f64 {
    if log_bf.is_nan() {
        return f64::NAN;
    }
    log_bf / std::f64::consts::LN_2
}

/// Evidence strength on the Jeffreys scale.
///
/// Labels are for presentation only; the raw log_bf is always preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStrength {
    /// |log_bf| = 0: No evidence
    None,
    /// 0 < |log_bf| < ln(3.2) ≈ 1.16: Barely worth mentioning
    Anecdotal,
    /// ln(3.2) <= |log_bf| < ln(10) ≈ 2.30: Substantial
    Substantial,
    /// ln(10) <= |log_bf| < ln(32) ≈ 3.47: Strong
    Strong,
    /// ln(32) <= |log_bf| < ln(100) ≈ 4.61: Very strong
    VeryStrong,
    /// |log_bf| >= ln(100): Decisive
    Decisive,
}

impl EvidenceStrength {
    /// Classify evidence strength from a log Bayes factor.
    ///
    /// Uses the absolute value; direction is reported separately.
    pub fn from_log_bf(log_bf: f64) -> Self {
        if log_bf.is_nan() {
            return EvidenceStrength::None;
        }

        let abs_log_bf = log_bf.abs();

        // Jeffreys scale thresholds (in nats)
        const LN_3_2: f64 = 1.163_150_809_678_64; // ln(3.2)
        const LN_32: f64 = 3.465_735_902_799_727; // ln(32)
        const LN_100: f64 = 4.605_170_185_988_092; // ln(100)
        let ln_10 = std::f64::consts::LN_10;

        if abs_log_bf < LN_3_2 {
            if abs_log_bf < f64::EPSILON {
                EvidenceStrength::None
            } else {
                EvidenceStrength::Anecdotal
            }
        } else if abs_log_bf < ln_10 {
            EvidenceStrength::Substantial
        } else if abs_log_bf < LN_32 {
            EvidenceStrength::Strong
        } else if abs_log_bf < LN_100 {
            EvidenceStrength::VeryStrong
        } else {
            EvidenceStrength::Decisive
        }
    }

    /// Return a short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            EvidenceStrength::None => "none",
            EvidenceStrength::Anecdotal => "anecdotal",
            EvidenceStrength::Substantial => "substantial",
            EvidenceStrength::Strong => "strong",
            EvidenceStrength::VeryStrong => "very strong",
            EvidenceStrength::Decisive => "decisive",
        }
    }
}

impl std::fmt::Display for EvidenceStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which side of the comparison the data favors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceDirection {
    /// log_bf > 0: data favor the first hypothesis
    FavorsFirst,
    /// log_bf < 0: data favor the second hypothesis
    FavorsSecond,
    /// log_bf = 0 or undefined
    Neutral,
}

impl EvidenceDirection {
    /// Determine direction from log Bayes factor.
    pub fn from_log_bf(log_bf: f64) -> Self {
        if log_bf.is_nan() || log_bf.abs() < f64::EPSILON {
            EvidenceDirection::Neutral
        } else if log_bf > 0.0 {
            EvidenceDirection::FavorsFirst
        } else {
            EvidenceDirection::FavorsSecond
        }
    }
}

/// Complete evidence summary for one pairwise comparison.
#[derive(Debug, Clone, Serialize)]
pub struct EvidenceSummary {
    /// Log Bayes factor in nats (raw value, always preserved).
    pub log_bf: f64,
    /// Bayes factor (exp(log_bf), clamped for safety).
    pub bayes_factor: f64,
    /// Evidence in bits.
    pub delta_bits: f64,
    /// Evidence strength on Jeffreys scale.
    pub strength: EvidenceStrength,
    /// Which hypothesis is favored.
    pub direction: EvidenceDirection,
}

impl EvidenceSummary {
    /// Create an evidence summary from a log Bayes factor.
    pub fn from_log_bf(log_bf: f64) -> Self {
        EvidenceSummary {
            log_bf,
            bayes_factor: bayes_factor_from_log(log_bf),
            delta_bits: delta_bits(log_bf),
            strength: EvidenceStrength::from_log_bf(log_bf),
            direction: EvidenceDirection::from_log_bf(log_bf),
        }
    }

    /// Summarize the comparison of two likelihoods.
    pub fn from_likelihoods(likelihood_a: f64, likelihood_b: f64) -> Self {
        Self::from_log_bf(log_bayes_factor(likelihood_a, likelihood_b))
    }
}
