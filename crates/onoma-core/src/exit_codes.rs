//! Exit codes for the onoma-core CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0-1: Operational outcomes
//! - 10-19: User/input errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

use onoma_common::Error;

/// Exit codes for onoma-core operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    /// A reproduced scenario is outside its tolerance
    ScenarioMismatch = 1,

    /// Invalid arguments
    ArgsError = 10,

    /// Priors or likelihoods rejected by the calculator
    InvalidInput = 11,

    /// Every joint weight is zero
    DegenerateResult = 12,

    /// Preset table missing, unreadable or invalid
    ConfigError = 13,

    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Codes 10-19: resolvable by changing the invocation or config.
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&(self as i32))
    }

    /// Codes 20-29: bugs or environment failures.
    pub fn is_internal_error(self) -> bool {
        (self as i32) >= 20
    }

    /// Get the code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ScenarioMismatch => "ERR_SCENARIO_MISMATCH",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::InvalidInput => "ERR_INVALID_INPUT",
            ExitCode::DegenerateResult => "ERR_DEGENERATE",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::InvalidInput(_) => ExitCode::InvalidInput,
            Error::DegenerateResult(_) => ExitCode::DegenerateResult,
            Error::Config(_) | Error::InvalidPresetTable(_) | Error::UnknownPreset(_) => {
                ExitCode::ConfigError
            }
            Error::Io(_) => ExitCode::IoError,
            Error::Json(_) => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
