//! Preset table files.
//!
//! A preset table is an optional JSON or TOML file that adds presets to
//! the built-in set or overrides built-in presets by name:
//!
//! ```toml
//! schema_version = "1.0.0"
//! default_preset = "loo"
//!
//! [default_likelihoods]
//! mg = 0.7
//! o = 0.1
//! sp = 0.07
//! r = 0.02
//!
//! [[presets]]
//! name = "ottonian"
//! aliases = ["otto"]
//! priors = { mg = 0.3, o = 0.5, sp = 0.1, r = 0.1 }
//! ```

use crate::likelihood::DEFAULT_LIKELIHOODS;
use crate::preset::{PresetError, PresetName};
use crate::validate::{ValidationError, ValidationResult};
use onoma_common::HypothesisScores;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File format of a preset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Toml,
}

impl TableFormat {
    /// Pick the format from the file extension; anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => TableFormat::Toml,
            _ => TableFormat::Json,
        }
    }
}

/// One named set of prior weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PresetEntry {
    /// Preset name, matched case-insensitively.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Alternative names accepted on lookup.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Unnormalized prior weights (Mg, O, Sp, R).
    pub priors: HypothesisScores,
}

impl PresetEntry {
    fn from_builtin(name: PresetName) -> Self {
        Self {
            name: name.as_str().to_string(),
            label: Some(name.label().to_string()),
            description: Some(name.description().to_string()),
            aliases: name.aliases().iter().map(|a| a.to_string()).collect(),
            priors: name.priors(),
        }
    }

    /// Label for display, falling back to the name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// True if `key` is this entry's name or one of its aliases.
    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        self.name.eq_ignore_ascii_case(key) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(key))
    }
}

/// A table of presets plus table-wide defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PresetTable {
    pub schema_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Preset used when the caller names none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_preset: Option<String>,

    /// Likelihoods used when the caller gives none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_likelihoods: Option<HypothesisScores>,

    #[serde(default)]
    pub presets: Vec<PresetEntry>,
}

impl PresetTable {
    /// The built-in presets as a table.
    pub fn builtin() -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            description: Some("Built-in presets".to_string()),
            default_preset: Some(PresetName::default().as_str().to_string()),
            default_likelihoods: Some(DEFAULT_LIKELIHOODS),
            presets: PresetName::ALL.iter().copied().map(PresetEntry::from_builtin).collect(),
        }
    }

    /// Load a table from disk, choosing the parser by extension.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content, TableFormat::from_path(path))
    }

    /// Parse a table in the given format.
    pub fn parse(content: &str, format: TableFormat) -> ValidationResult<Self> {
        match format {
            TableFormat::Json => Self::from_json_str(content),
            TableFormat::Toml => Self::from_toml_str(content),
        }
    }

    pub fn from_json_str(json: &str) -> ValidationResult<Self> {
        serde_json::from_str(json).map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    pub fn from_toml_str(content: &str) -> ValidationResult<Self> {
        toml::from_str(content).map_err(|e| ValidationError::ParseError(format!("Invalid TOML: {}", e)))
    }

    /// Overlay this table on the built-ins.
    ///
    /// Entries replace built-ins with the same name; an override without
    /// aliases, label or description keeps the built-in ones. New names
    /// are appended in file order. Table-wide defaults from the file win.
    pub fn merged_with_builtin(self) -> Self {
        let mut merged = Self::builtin();

        for entry in self.presets {
            match merged
                .presets
                .iter_mut()
                .find(|p| p.name.eq_ignore_ascii_case(entry.name.trim()))
            {
                Some(existing) => {
                    let PresetEntry {
                        name: _,
                        label,
                        description,
                        aliases,
                        priors,
                    } = entry;
                    existing.priors = priors;
                    if label.is_some() {
                        existing.label = label;
                    }
                    if description.is_some() {
                        existing.description = description;
                    }
                    if !aliases.is_empty() {
                        existing.aliases = aliases;
                    }
                }
                None => merged.presets.push(entry),
            }
        }

        merged.schema_version = self.schema_version;
        if self.description.is_some() {
            merged.description = self.description;
        }
        if self.default_preset.is_some() {
            merged.default_preset = self.default_preset;
        }
        if self.default_likelihoods.is_some() {
            merged.default_likelihoods = self.default_likelihoods;
        }
        merged
    }

    /// Find a preset by name or alias (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&PresetEntry> {
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(key.trim()))
            .or_else(|| self.presets.iter().find(|p| p.matches(key)))
    }

    /// Like [`PresetTable::get`], with an error listing the known names.
    pub fn resolve(&self, key: &str) -> Result<&PresetEntry, PresetError> {
        self.get(key).ok_or_else(|| PresetError::UnknownPreset {
            name: key.to_string(),
            available: self.names(),
        })
    }

    /// The table's default preset entry.
    pub fn default_entry(&self) -> Result<&PresetEntry, PresetError> {
        self.resolve(self.default_preset_name())
    }

    pub fn default_preset_name(&self) -> &str {
        self.default_preset.as_deref().unwrap_or(PresetName::Full.as_str())
    }

    pub fn default_likelihoods(&self) -> HypothesisScores {
        self.default_likelihoods.unwrap_or(DEFAULT_LIKELIHOODS)
    }

    pub fn names(&self) -> Vec<String> {
        self.presets.iter().map(|p| p.name.clone()).collect()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::builtin()
    }
}
