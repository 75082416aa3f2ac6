//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI arguments → environment variables → XDG paths → defaults.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Discovered configuration file paths.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path to the preset table (or None if not found).
    pub presets: Option<PathBuf>,

    /// Source of the preset table (for diagnostics).
    pub presets_source: ConfigSource,
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/onoma/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_PRESETS_PATH: &str = "ONOMA_PRESETS";
pub const ENV_CONFIG_DIR: &str = "ONOMA_CONFIG_DIR";

/// Preset table file names, in lookup order within a directory.
const PRESETS_FILENAMES: [&str; 2] = ["presets.json", "presets.toml"];

/// Application name for XDG directories.
const APP_NAME: &str = "onoma";

/// Resolve the preset table path using the standard resolution order.
///
/// 1. Explicit CLI path (if it exists)
/// 2. `ONOMA_PRESETS` (direct path)
/// 3. `ONOMA_CONFIG_DIR` + `presets.json` / `presets.toml`
/// 4. XDG config directory (~/.config/onoma/)
/// 5. System config (/etc/onoma/)
/// 6. Built-in defaults (None)
pub fn resolve_config(cli_presets: Option<&Path>) -> ConfigPaths {
    let mut paths = ConfigPaths::default();
    paths.presets = resolve_presets_path(cli_presets, &mut paths.presets_source);
    paths
}

fn resolve_presets_path(cli_path: Option<&Path>, source: &mut ConfigSource) -> Option<PathBuf> {
    // 1. CLI argument
    if let Some(path) = cli_path {
        if path.exists() {
            *source = ConfigSource::CliArgument;
            return Some(path.to_path_buf());
        }
    }

    // 2. Environment variable (direct path)
    if let Ok(env_path) = std::env::var(ENV_PRESETS_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            *source = ConfigSource::Environment;
            return Some(path);
        }
    }

    // 3. Environment variable (config dir)
    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        if let Some(path) = find_presets_file(Path::new(&config_dir)) {
            *source = ConfigSource::Environment;
            return Some(path);
        }
    }

    // 4. XDG config directory
    if let Some(dir) = xdg_config_dir() {
        if let Some(path) = find_presets_file(&dir) {
            *source = ConfigSource::XdgConfig;
            return Some(path);
        }
    }

    // 5. System config
    if let Some(path) = find_presets_file(&system_config_dir()) {
        *source = ConfigSource::SystemConfig;
        return Some(path);
    }

    // 6. Built-in default (None)
    *source = ConfigSource::BuiltinDefault;
    None
}

/// First preset table file present in `dir`.
pub fn find_presets_file(dir: &Path) -> Option<PathBuf> {
    PRESETS_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Get the XDG config directory for onoma.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}
