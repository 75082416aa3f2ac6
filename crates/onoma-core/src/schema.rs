//! JSON Schema generation for onoma-core payload types.
//!
//! Schemas are derived with `schemars` and exposed through the
//! `schema` subcommand so downstream tools can validate output.

use crate::inference::{MapEvidence, PosteriorInput, PosteriorReport, RankedHypothesis, SensitivityMatrix};
use crate::scenarios::{ScenarioCheck, ScenarioReport};
use onoma_common::{Hypothesis, HypothesisScores};
use onoma_config::{PresetEntry, PresetTable};
use schemars::schema_for;
use serde_json::Value;
use std::collections::BTreeMap;

/// Schema names and descriptions, in listing order.
pub fn available_schemas() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Hypothesis", "One of the four name-origin hypotheses"),
        ("HypothesisScores", "Per-hypothesis values (mg, o, sp, r)"),
        ("PosteriorInput", "Priors and likelihoods for one computation"),
        ("RankedHypothesis", "Hypothesis with its posterior, highest first"),
        ("MapEvidence", "Likelihood ratio of the MAP hypothesis against the runner-up"),
        ("PosteriorReport", "Output of `calc`"),
        ("SensitivityMatrix", "Output of `sensitivity`"),
        ("ScenarioCheck", "One published scenario recomputed"),
        ("ScenarioReport", "Output of `scenarios`"),
        ("PresetEntry", "One named set of prior weights"),
        ("PresetTable", "Preset table file (JSON or TOML)"),
    ]
}

/// Schema for `type_name` as JSON, or None if the type is unknown.
pub fn generate_schema(type_name: &str) -> Option<Value> {
    let schema = match type_name {
        "Hypothesis" => schema_for!(Hypothesis),
        "HypothesisScores" => schema_for!(HypothesisScores),
        "PosteriorInput" => schema_for!(PosteriorInput),
        "RankedHypothesis" => schema_for!(RankedHypothesis),
        "MapEvidence" => schema_for!(MapEvidence),
        "PosteriorReport" => schema_for!(PosteriorReport),
        "SensitivityMatrix" => schema_for!(SensitivityMatrix),
        "ScenarioCheck" => schema_for!(ScenarioCheck),
        "ScenarioReport" => schema_for!(ScenarioReport),
        "PresetEntry" => schema_for!(PresetEntry),
        "PresetTable" => schema_for!(PresetTable),
        _ => return None,
    };

    serde_json::to_value(schema).ok()
}

/// Every listed schema keyed by type name.
pub fn generate_all_schemas() -> BTreeMap<String, Value> {
    available_schemas()
        .into_iter()
        .filter_map(|(name, _)| generate_schema(name).map(|s| (name.to_string(), s)))
        .collect()
}

/// Schema output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
}

/// Format a schema value for output.
pub fn format_schema(schema: &Value, format: SchemaFormat) -> Result<String, serde_json::Error> {
    match format {
        SchemaFormat::Json => serde_json::to_string_pretty(schema),
        SchemaFormat::JsonCompact => serde_json::to_string(schema),
    }
}
