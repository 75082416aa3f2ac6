//! Configuration snapshots for reproducibility.
//!
//! A snapshot records which preset table a run used, where it came from
//! and a hash of its exact bytes, so a reported posterior can be traced
//! back to its inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::resolve::{ConfigPaths, ConfigSource};
use crate::table::PresetTable;

/// A frozen snapshot of configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,

    /// Schema version of the configuration.
    pub schema_version: String,

    /// Source of the preset table.
    pub presets_source: String,

    /// Path the preset table was loaded from.
    #[serde(default)]
    pub presets_path: Option<String>,

    /// SHA-256 of the preset table file, or of the serialized built-ins.
    pub presets_hash: String,

    /// Number of presets after merging with the built-ins.
    pub preset_count: usize,

    pub default_preset: String,
}

impl ConfigSnapshot {
    /// Snapshot of a table loaded from `content`.
    pub fn new(table: &PresetTable, paths: &ConfigPaths, content: &str) -> Self {
        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: table.schema_version.clone(),
            presets_source: paths.presets_source.to_string(),
            presets_path: paths.presets.as_ref().map(|p| p.display().to_string()),
            presets_hash: hash_content(content),
            preset_count: table.presets.len(),
            default_preset: table.default_preset_name().to_string(),
        }
    }

    /// Snapshot when no preset file was found.
    pub fn defaults_only() -> Self {
        let table = PresetTable::builtin();
        let content = serde_json::to_string(&table).unwrap_or_default();
        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            presets_source: ConfigSource::BuiltinDefault.to_string(),
            presets_path: None,
            presets_hash: hash_content(&content),
            preset_count: table.presets.len(),
            default_preset: table.default_preset_name().to_string(),
        }
    }

    /// Serialize snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check if this snapshot matches another (same config).
    pub fn matches(&self, other: &ConfigSnapshot) -> bool {
        self.presets_hash == other.presets_hash
    }

    /// Short identifier (first 12 chars of the hash).
    pub fn short_id(&self) -> &str {
        &self.presets_hash[..12.min(self.presets_hash.len())]
    }
}

/// Hash content with SHA-256 and return hex string.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_snapshot() {
        let snapshot = ConfigSnapshot::defaults_only();
        assert_eq!(snapshot.schema_version, crate::CONFIG_SCHEMA_VERSION);
        assert_eq!(snapshot.presets_source, "builtin default");
        assert!(snapshot.presets_path.is_none());
        assert_eq!(snapshot.preset_count, 5);
        assert_eq!(snapshot.default_preset, "full");
    }

    #[test]
    fn test_snapshot_short_id() {
        assert_eq!(ConfigSnapshot::defaults_only().short_id().len(), 12);
    }

    #[test]
    fn test_defaults_are_deterministic() {
        assert!(ConfigSnapshot::defaults_only().matches(&ConfigSnapshot::defaults_only()));
    }

    #[test]
    fn test_snapshot_from_file_content() {
        let content = r#"{"schema_version":"1.0.0","default_preset":"loo"}"#;
        let table = PresetTable::from_json_str(content).unwrap().merged_with_builtin();
        let paths = ConfigPaths {
            presets: Some(PathBuf::from("/tmp/presets.json")),
            presets_source: ConfigSource::CliArgument,
        };
        let snapshot = ConfigSnapshot::new(&table, &paths, content);
        assert_eq!(snapshot.presets_hash, hash_content(content));
        assert_eq!(snapshot.presets_source, "CLI argument");
        assert_eq!(snapshot.default_preset, "loo");
        assert!(!snapshot.matches(&ConfigSnapshot::defaults_only()));
    }

    #[test]
    fn test_hash_content() {
        let hash = hash_content("test");
        assert_eq!(hash, hash_content("test"));
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let snapshot = ConfigSnapshot::defaults_only();
        let restored = ConfigSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert!(snapshot.matches(&restored));
    }
}
