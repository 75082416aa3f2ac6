//! Onoma common types and errors.
//!
//! This crate provides foundational types shared across the onoma crates:
//! - The four name-origin hypotheses and their display labels
//! - A per-hypothesis score container with stable ordering
//! - Common error types with stable codes
//! - Output formats

pub mod error;
pub mod hypothesis;
pub mod output;

pub use error::{Error, ErrorCategory, Result, StructuredError, SuggestedAction};
pub use hypothesis::{Hypothesis, HypothesisScores, HYPOTHESIS_COUNT};
pub use output::OutputFormat;

/// Schema version for machine-readable output payloads.
pub const SCHEMA_VERSION: &str = "1.0.0";
