//! Fuzz target for TOML preset table parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use onoma_config::{validate_preset_table, PresetTable};

fuzz_target!(|data: &str| {
    if let Ok(table) = PresetTable::from_toml_str(data) {
        let _ = validate_preset_table(&table);
    }
});
