//! Onoma configuration loading and validation.
//!
//! This crate provides:
//! - Built-in named prior presets and the preset-table file format
//! - Default likelihoods and their recommended ranges
//! - The reference scenarios published with the model
//! - Config resolution (CLI → env → XDG → system → defaults)
//! - Semantic validation and config snapshots

pub mod likelihood;
pub mod preset;
pub mod resolve;
pub mod scenario;
pub mod snapshot;
pub mod table;
pub mod validate;

pub use likelihood::{check_ranges, RangeWarning, RecommendedRange, DEFAULT_LIKELIHOODS};
pub use preset::{PresetError, PresetName};
pub use resolve::{find_presets_file, resolve_config, ConfigPaths, ConfigSource, ENV_CONFIG_DIR, ENV_PRESETS_PATH};
pub use scenario::{find_scenario, Scenario, ARTICLE_SCENARIOS};
pub use snapshot::{hash_content, ConfigSnapshot};
pub use table::{PresetEntry, PresetTable, TableFormat};
pub use validate::{validate_preset_table, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
