//! Structured event definitions for logging.
//!
//! Events follow a consistent schema for machine-parseable JSONL output.
//! All events carry the run ID and the stage that emitted them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Log levels for events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Level::Trace,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

/// Stages of one CLI invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Startup and argument handling.
    Init,
    /// Preset table resolution and loading.
    Config,
    /// Posterior computation.
    Infer,
    /// Sensitivity sweeps and scenario reproduction.
    Analyze,
    /// Rendering output.
    Report,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Init => "init",
            Stage::Config => "config",
            Stage::Infer => "infer",
            Stage::Analyze => "analyze",
            Stage::Report => "report",
        };
        write!(f, "{}", s)
    }
}

/// Standard event names used in logging.
pub mod event_names {
    // Run lifecycle
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";

    // Config
    pub const CONFIG_LOADED: &str = "config.loaded";
    pub const CONFIG_DEFAULT_USED: &str = "config.default_used";
    pub const CONFIG_ERROR: &str = "config.error";

    // Infer
    pub const INFER_INPUT_OUT_OF_RANGE: &str = "infer.input_out_of_range";
    pub const INFER_FINISHED: &str = "infer.finished";
    pub const INFER_FAILED: &str = "infer.failed";

    // Analyze
    pub const SENSITIVITY_FINISHED: &str = "analyze.sensitivity_finished";
    pub const SCENARIO_CHECKED: &str = "analyze.scenario_checked";
    pub const SCENARIO_MISMATCH: &str = "analyze.scenario_mismatch";

    // Error events
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// A structured log event for JSONL output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub ts: DateTime<Utc>,
    pub level: Level,
    /// Event name (e.g., "run.started", "infer.finished").
    pub event: String,
    /// Unique ID for this invocation.
    pub run_id: String,
    /// Subcommand being run, once known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub stage: Stage,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, serde_json::Value>,
}

impl LogEvent {
    /// Create a new log event with required fields.
    pub fn new(
        level: Level,
        event: impl Into<String>,
        run_id: impl Into<String>,
        stage: Stage,
        message: impl Into<String>,
    ) -> Self {
        LogEvent {
            ts: Utc::now(),
            level,
            event: event.into(),
            run_id: run_id.into(),
            command: None,
            stage,
            message: message.into(),
            fields: HashMap::new(),
        }
    }

    /// Add a field to the event.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.fields.insert(key.into(), v);
        }
        self
    }

    /// Serialize to a single JSON line.
    pub fn to_jsonl(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"error":"serialization_failed","event":"{}"}}"#,
                self.event
            )
        })
    }
}

/// Context for generating log events with a consistent run ID.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub run_id: String,
    pub command: Option<String>,
}

impl LogContext {
    pub fn new(run_id: impl Into<String>) -> Self {
        LogContext {
            run_id: run_id.into(),
            command: None,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Create an event with this context.
    pub fn event(
        &self,
        level: Level,
        event: impl Into<String>,
        stage: Stage,
        message: impl Into<String>,
    ) -> LogEvent {
        let mut e = LogEvent::new(level, event, &self.run_id, stage, message);
        e.command.clone_from(&self.command);
        e
    }

    pub fn info(&self, event: impl Into<String>, stage: Stage, message: impl Into<String>) -> LogEvent {
        self.event(Level::Info, event, stage, message)
    }

    pub fn warn(&self, event: impl Into<String>, stage: Stage, message: impl Into<String>) -> LogEvent {
        self.event(Level::Warn, event, stage, message)
    }
}
