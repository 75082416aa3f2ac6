//! Preset table loading for onoma-core.
//!
//! This module handles:
//! - Resolving the preset table file (CLI > env > XDG > system > built-in)
//! - Parsing JSON or TOML and semantic validation
//! - Merging the file over the built-in presets
//! - Snapshot generation with a content hash

pub use onoma_config::{ConfigSnapshot, ConfigSource, PresetEntry, PresetTable, ValidationError};

use onoma_common::Error;
use onoma_config::{find_presets_file, resolve_config, validate_preset_table, TableFormat};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid preset table {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::NotFound { path }
            | ConfigError::IoError { path, .. }
            | ConfigError::Invalid { path, .. } => path,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid { .. } => Error::InvalidPresetTable(err.to_string()),
            other => Error::Config(other.to_string()),
        }
    }
}

/// Configuration resolution options.
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    /// Explicit preset table file; must exist when given.
    pub presets_path: Option<PathBuf>,
    /// Directory searched for `presets.json` / `presets.toml` before the
    /// standard locations.
    pub config_dir: Option<PathBuf>,
}

/// Loaded preset table with provenance.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// File presets merged over the built-ins.
    pub table: PresetTable,
    /// File the table came from (None for built-ins only).
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
    pub snapshot: ConfigSnapshot,
}

impl ResolvedConfig {
    /// Built-in presets only.
    pub fn builtin() -> Self {
        ResolvedConfig {
            table: PresetTable::builtin(),
            path: None,
            source: ConfigSource::BuiltinDefault,
            snapshot: ConfigSnapshot::defaults_only(),
        }
    }
}

/// Load the preset table with the standard resolution order.
///
/// 1. `options.presets_path` (error if missing)
/// 2. `options.config_dir`
/// 3. `ONOMA_PRESETS`, `ONOMA_CONFIG_DIR`, XDG, `/etc/onoma`
/// 4. Built-in presets
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    if let Some(path) = &options.presets_path {
        if !path.exists() {
            return Err(ConfigError::NotFound { path: path.clone() });
        }
        return load_from(path, ConfigSource::CliArgument);
    }

    if let Some(dir) = &options.config_dir {
        if let Some(path) = find_presets_file(dir) {
            return load_from(&path, ConfigSource::CliArgument);
        }
    }

    let paths = resolve_config(None);
    match &paths.presets {
        Some(path) => load_from(path, paths.presets_source),
        None => Ok(ResolvedConfig::builtin()),
    }
}

/// Read, parse and validate one preset table file without merging.
pub fn read_table(path: &Path) -> Result<(PresetTable, String), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::IoError {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let invalid = |source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    };
    let table = PresetTable::parse(&content, TableFormat::from_path(path)).map_err(invalid)?;
    validate_preset_table(&table).map_err(invalid)?;
    Ok((table, content))
}

fn load_from(path: &Path, source: ConfigSource) -> Result<ResolvedConfig, ConfigError> {
    let (table, content) = read_table(path)?;
    let table = table.merged_with_builtin();
    let paths = onoma_config::ConfigPaths {
        presets: Some(path.to_path_buf()),
        presets_source: source,
    };
    let snapshot = ConfigSnapshot::new(&table, &paths, &content);

    Ok(ResolvedConfig {
        table,
        path: Some(path.to_path_buf()),
        source,
        snapshot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VALID: &str = r#"{
        "schema_version": "1.0.0",
        "default_preset": "otto",
        "presets": [
            {"name": "ottonian", "aliases": ["otto"], "priors": {"mg": 0.3, "o": 0.5, "sp": 0.1, "r": 0.1}}
        ]
    }"#;

    #[test]
    fn explicit_path_loads_and_merges() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mine.json");
        fs::write(&path, VALID).unwrap();

        let config = load_config(&ConfigOptions {
            presets_path: Some(path.clone()),
            config_dir: None,
        })
        .unwrap();
        assert_eq!(config.source, ConfigSource::CliArgument);
        assert_eq!(config.path.as_deref(), Some(path.as_path()));
        assert_eq!(config.table.presets.len(), 6);
        assert_eq!(config.table.default_entry().unwrap().name, "ottonian");
        assert_eq!(config.snapshot.presets_hash, onoma_config::hash_content(VALID));
    }

    #[test]
    fn explicit_missing_path_is_not_found() {
        let err = load_config(&ConfigOptions {
            presets_path: Some(PathBuf::from("/nonexistent/onoma/presets.json")),
            config_dir: None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
        assert!(matches!(Error::from(err), Error::Config(_)));
    }

    #[test]
    fn config_dir_finds_toml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("presets.toml"),
            "schema_version = \"1.0.0\"\ndefault_preset = \"xw\"\n",
        )
        .unwrap();

        let config = load_config(&ConfigOptions {
            presets_path: None,
            config_dir: Some(dir.path().to_path_buf()),
        })
        .unwrap();
        assert_eq!(config.table.default_preset_name(), "xw");
        assert_eq!(config.table.presets.len(), 5);
    }

    #[test]
    fn invalid_table_maps_to_preset_table_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"schema_version": "2.0.0"}"#).unwrap();

        let err = read_table(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                source: ValidationError::VersionMismatch { .. },
                ..
            }
        ));
        assert_eq!(err.path(), path.as_path());
        assert!(matches!(Error::from(err), Error::InvalidPresetTable(_)));
    }

    #[test]
    fn builtin_config_has_all_presets() {
        let config = ResolvedConfig::builtin();
        assert_eq!(config.table.presets.len(), 5);
        assert_eq!(config.snapshot.presets_source, "builtin default");
    }
}
