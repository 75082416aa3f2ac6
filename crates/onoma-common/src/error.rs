//! Error types for onoma.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for automation
//! - Remediation suggestions for humans
//!
//! # Agent-Facing Output
//!
//! Errors serialize to structured JSON:
//! ```json
//! {
//!   "code": 20,
//!   "category": "input",
//!   "message": "invalid input: priors[1] must be non-negative, got -0.2",
//!   "recoverable": true,
//!   "suggested_action": "fix_input"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for onoma operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Configuration file errors (preset tables, schema).
    Config,
    /// Caller-supplied priors or likelihoods.
    Input,
    /// Posterior computation errors.
    Inference,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Inference => write!(f, "inference"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Suggested actions for agents to take in response to errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    /// Correct the supplied priors or likelihoods.
    FixInput,
    /// Validate the configuration with `config validate`.
    RunCheck,
    /// Fall back to built-in presets.
    ResetConfig,
    /// Retry the operation.
    Retry,
    /// Manual intervention required.
    ManualIntervention,
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestedAction::FixInput => write!(f, "fix_input"),
            SuggestedAction::RunCheck => write!(f, "run_check"),
            SuggestedAction::ResetConfig => write!(f, "reset_config"),
            SuggestedAction::Retry => write!(f, "retry"),
            SuggestedAction::ManualIntervention => write!(f, "manual_intervention"),
        }
    }
}

/// Unified error type for onoma.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid preset table: {0}")]
    InvalidPresetTable(String),

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    // Input errors (20-29)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Inference errors (30-39)
    #[error("degenerate result: {0}")]
    DegenerateResult(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Input errors
    /// - 30-39: Inference errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidPresetTable(_) => 11,
            Error::UnknownPreset(_) => 12,
            Error::InvalidInput(_) => 20,
            Error::DegenerateResult(_) => 30,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidPresetTable(_) | Error::UnknownPreset(_) => {
                ErrorCategory::Config
            }
            Error::InvalidInput(_) => ErrorCategory::Input,
            Error::DegenerateResult(_) => ErrorCategory::Inference,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error is potentially recoverable.
    ///
    /// Nothing here is recoverable by retrying with the same input; the
    /// caller has to change the input or the configuration.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) => true,
            Error::InvalidPresetTable(_) => true,
            Error::UnknownPreset(_) => true,
            Error::InvalidInput(_) => true,
            Error::DegenerateResult(_) => true,
            Error::Io(_) => true,
            Error::Json(_) => false,
        }
    }

    /// Returns the suggested action for agents.
    pub fn suggested_action(&self) -> SuggestedAction {
        match self {
            Error::Config(_) => SuggestedAction::RunCheck,
            Error::InvalidPresetTable(_) => SuggestedAction::ResetConfig,
            Error::UnknownPreset(_) => SuggestedAction::FixInput,
            Error::InvalidInput(_) => SuggestedAction::FixInput,
            Error::DegenerateResult(_) => SuggestedAction::FixInput,
            Error::Io(_) => SuggestedAction::Retry,
            Error::Json(_) => SuggestedAction::ManualIntervention,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => "Run 'onoma-core config validate' to check the preset table.",
            Error::InvalidPresetTable(_) => {
                "Fix the preset table file, or unset ONOMA_PRESETS to use the built-in presets."
            }
            Error::UnknownPreset(_) => "List available presets with 'onoma-core presets'.",
            Error::InvalidInput(_) => {
                "Priors must be non-negative with a positive sum; likelihoods must be non-negative."
            }
            Error::DegenerateResult(_) => {
                "Every hypothesis has zero support. Give at least one hypothesis a positive prior and a positive likelihood."
            }
            Error::Io(_) => "Check that the file exists and is readable, then retry.",
            Error::Json(_) => "Internal serialization failure. Please report this as a bug.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidPresetTable(_) => "Invalid Preset Table",
            Error::UnknownPreset(_) => "Unknown Preset",
            Error::InvalidInput(_) => "Invalid Input",
            Error::DegenerateResult(_) => "Degenerate Result",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Error",
        }
    }

    /// Format for a terminal: headline, reason and fix.
    pub fn to_human(&self) -> String {
        format!(
            "✗ {}\n  Reason: {}\n  Fix: {}",
            self.headline(),
            self,
            self.remediation()
        )
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Suggested action for agents.
    pub suggested_action: SuggestedAction,

    /// Additional structured context (e.g., field name, file path).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action(),
            context: HashMap::new(),
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }

    /// Serialize to pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_json())
    }
}
