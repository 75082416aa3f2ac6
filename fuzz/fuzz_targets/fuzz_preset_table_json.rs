//! Fuzz target for JSON preset table parsing.
//!
//! Parsing and validation must return errors for malformed tables, never
//! panic. Tables that validate must also merge and resolve their default.

#![no_main]

use libfuzzer_sys::fuzz_target;
use onoma_config::{validate_preset_table, PresetTable};

fuzz_target!(|data: &str| {
    let Ok(table) = PresetTable::from_json_str(data) else {
        return;
    };
    if validate_preset_table(&table).is_ok() {
        let merged = table.merged_with_builtin();
        assert!(merged.default_entry().is_ok());
    }
});
