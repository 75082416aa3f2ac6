//! Payloads for the preset and config commands.

use super::{percent, table_row, table_rule, Render};
use crate::config::ResolvedConfig;
use chrono::{DateTime, Utc};
use onoma_common::{Hypothesis, HypothesisScores, SCHEMA_VERSION};
use onoma_config::{ConfigSnapshot, PresetTable};
use serde::Serialize;

/// One preset as listed by `presets`.
#[derive(Debug, Clone, Serialize)]
pub struct PresetRow {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub priors: HypothesisScores,
    pub is_default: bool,
}

/// Output of `presets`.
#[derive(Debug, Clone, Serialize)]
pub struct PresetListing {
    pub schema_version: String,
    /// Where the preset table came from.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub default_preset: String,
    pub default_likelihoods: HypothesisScores,
    pub presets: Vec<PresetRow>,
}

impl PresetListing {
    pub fn new(config: &ResolvedConfig) -> Self {
        let table = &config.table;
        let default = table.default_entry().ok().map(|e| e.name.as_str());
        let presets = table
            .presets
            .iter()
            .map(|entry| PresetRow {
                name: entry.name.clone(),
                label: entry.display_label().to_string(),
                aliases: entry.aliases.clone(),
                priors: entry.priors,
                is_default: Some(entry.name.as_str()) == default,
            })
            .collect();

        PresetListing {
            schema_version: SCHEMA_VERSION.to_string(),
            source: config.source.to_string(),
            path: config.path.as_ref().map(|p| p.display().to_string()),
            default_preset: table.default_preset_name().to_string(),
            default_likelihoods: table.default_likelihoods(),
            presets,
        }
    }
}

fn scores_cells(scores: &HypothesisScores) -> Vec<String> {
    Hypothesis::ALL.iter().map(|&h| format!("{:.3}", scores.get(h))).collect()
}

impl Render for PresetListing {
    fn markdown(&self) -> String {
        let mut lines = vec![
            "# Presets".to_string(),
            String::new(),
            format!(
                "Source: {}{}",
                self.source,
                self.path.as_ref().map(|p| format!(" ({})", p)).unwrap_or_default()
            ),
            String::new(),
        ];

        let mut header = vec!["Preset".to_string(), "Label".to_string()];
        header.extend(Hypothesis::ALL.iter().map(|h| h.code().to_string()));
        header.push("Aliases".to_string());
        lines.push(table_row(&header));
        lines.push(table_rule(header.len()));

        for row in &self.presets {
            let name = if row.is_default {
                format!("**{}**", row.name)
            } else {
                row.name.clone()
            };
            let mut cells = vec![name, row.label.clone()];
            cells.extend(scores_cells(&row.priors));
            cells.push(row.aliases.join(", "));
            lines.push(table_row(&cells));
        }

        lines.push(String::new());
        lines.push(format!(
            "Default likelihoods: {}",
            Hypothesis::ALL
                .iter()
                .map(|&h| format!("P(D|{}) = {}", h.code(), self.default_likelihoods.get(h)))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        lines.join("\n")
    }

    fn summary(&self) -> String {
        let names: Vec<&str> = self.presets.iter().map(|p| p.name.as_str()).collect();
        format!(
            "{} presets ({}), default {}, source {}",
            names.len(),
            names.join(", "),
            self.default_preset,
            self.source
        )
    }
}

/// Output of `config show`.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigView {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub snapshot: ConfigSnapshot,
    pub table: PresetTable,
}

impl ConfigView {
    pub fn new(config: &ResolvedConfig) -> Self {
        ConfigView {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            snapshot: config.snapshot.clone(),
            table: config.table.clone(),
        }
    }
}

impl Render for ConfigView {
    fn markdown(&self) -> String {
        let snapshot = &self.snapshot;
        let mut lines = vec!["# onoma-core config show".to_string(), String::new()];
        match &snapshot.presets_path {
            Some(path) => {
                lines.push(format!("Source: {} ({})", path, snapshot.presets_source));
                lines.push(format!("Hash: {}", snapshot.presets_hash));
            }
            None => lines.push("Source: **built-in defaults** (no preset file found)".to_string()),
        }
        lines.push(format!("Schema version: {}", snapshot.schema_version));
        lines.push(format!("Presets: {}", snapshot.preset_count));
        lines.push(format!("Default preset: {}", snapshot.default_preset));
        let likelihoods = self.table.default_likelihoods();
        lines.push(format!(
            "Default likelihoods: {}",
            Hypothesis::ALL
                .iter()
                .map(|&h| format!("{} {}", h.code(), percent(likelihoods.get(h))))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        lines.join("\n")
    }

    fn summary(&self) -> String {
        format!(
            "[{}] config: presets={} ({} presets, default {})",
            self.snapshot.short_id(),
            self.snapshot
                .presets_path
                .as_deref()
                .unwrap_or("built-in defaults"),
            self.snapshot.preset_count,
            self.snapshot.default_preset
        )
    }
}

/// Output of a successful `config validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationView {
    pub schema_version: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub source: String,
    pub using_defaults: bool,
    /// Presets after merging with the built-ins.
    pub preset_count: usize,
    pub hash: String,
}

impl ValidationView {
    pub fn new(path: Option<String>, source: String, preset_count: usize, hash: String) -> Self {
        ValidationView {
            schema_version: SCHEMA_VERSION.to_string(),
            status: "valid",
            using_defaults: path.is_none(),
            path,
            source,
            preset_count,
            hash,
        }
    }
}

impl Render for ValidationView {
    fn markdown(&self) -> String {
        let target = match &self.path {
            Some(path) => format!("Presets: {}", path),
            None => "Presets: using built-in defaults".to_string(),
        };
        ["# Configuration Validation", "", "Status: ✓ Valid", target.as_str()].join("\n")
    }

    fn summary(&self) -> String {
        format!(
            "config validate: OK ({})",
            self.path.as_deref().unwrap_or("built-in defaults")
        )
    }
}
