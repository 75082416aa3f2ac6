//! Onoma math utilities.

pub mod math;

pub use math::bayes_factor::{
    bayes_factor_from_log, log_bayes_factor, EvidenceDirection, EvidenceStrength, EvidenceSummary,
};
pub use math::pooled::*;
pub use math::posterior::*;
