//! Configuration validation errors and semantic validation.

use crate::table::{PresetEntry, PresetTable};
use onoma_common::{Hypothesis, HypothesisScores};
use std::collections::HashMap;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Duplicate preset name or alias '{name}' (in '{first}' and '{second}')")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::DuplicateName { .. } => 62,
            ValidationError::SemanticError(_) => 63,
            ValidationError::MissingField(_) => 64,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Validate a preset table as read from a file.
///
/// `default_preset` may name a built-in preset the file does not redefine.
/// Names and aliases must stay unique once the file is merged over the
/// built-ins; an entry that overrides a built-in by name is not a clash.
pub fn validate_preset_table(table: &PresetTable) -> ValidationResult<()> {
    if table.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: table.schema_version.clone(),
        });
    }

    for (idx, entry) in table.presets.iter().enumerate() {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField(format!("presets[{}].name", idx)));
        }
        if entry.aliases.iter().any(|a| a.trim().is_empty()) {
            return Err(ValidationError::InvalidValue {
                field: format!("presets.{}.aliases", name),
                message: "Aliases must not be empty".to_string(),
            });
        }

        validate_scores(&format!("presets.{}.priors", name), &entry.priors)?;
        let sum = entry.priors.sum();
        if sum <= 0.0 {
            return Err(ValidationError::SemanticError(format!(
                "Priors of preset '{}' must have a positive sum",
                name
            )));
        }
        if !sum.is_finite() {
            return Err(ValidationError::SemanticError(format!(
                "Priors of preset '{}' overflow when summed",
                name
            )));
        }
    }
    ensure_unique_keys(&table.presets)?;

    let merged = table.clone().merged_with_builtin();
    ensure_unique_keys(&merged.presets)?;

    if let Some(likelihoods) = &table.default_likelihoods {
        validate_scores("default_likelihoods", likelihoods)?;
        let sum = likelihoods.sum();
        if sum <= 0.0 {
            return Err(ValidationError::SemanticError(
                "default_likelihoods must not all be zero".to_string(),
            ));
        }
        if !sum.is_finite() {
            return Err(ValidationError::SemanticError(
                "default_likelihoods overflow when summed".to_string(),
            ));
        }
    }

    if let Some(default) = &table.default_preset {
        if merged.get(default).is_none() {
            return Err(ValidationError::InvalidValue {
                field: "default_preset".to_string(),
                message: format!(
                    "Unknown preset '{}'. Available: {}",
                    default,
                    merged.names().join(", ")
                ),
            });
        }
    }

    Ok(())
}

/// No name or alias may be claimed twice (case-insensitive).
fn ensure_unique_keys(presets: &[PresetEntry]) -> ValidationResult<()> {
    // Lowercased name/alias -> owning preset name.
    let mut seen: HashMap<String, String> = HashMap::new();
    for entry in presets {
        let name = entry.name.trim();
        for key in std::iter::once(name).chain(entry.aliases.iter().map(|a| a.trim())) {
            if let Some(first) = seen.insert(key.to_lowercase(), name.to_string()) {
                return Err(ValidationError::DuplicateName {
                    name: key.to_string(),
                    first,
                    second: name.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Every score must be finite and non-negative.
fn validate_scores(field: &str, scores: &HypothesisScores) -> ValidationResult<()> {
    for hypothesis in Hypothesis::ALL {
        let value = scores.get(hypothesis);
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: format!("{}.{}", field, hypothesis.code().to_lowercase()),
                message: format!("Must be finite and non-negative, got {}", value),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, aliases: &[&str], priors: HypothesisScores) -> PresetEntry {
        PresetEntry {
            name: name.to_string(),
            label: None,
            description: None,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            priors,
        }
    }

    fn table(presets: Vec<PresetEntry>) -> PresetTable {
        PresetTable {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            description: None,
            default_preset: None,
            default_likelihoods: None,
            presets,
        }
    }

    #[test]
    fn builtin_table_is_valid() {
        validate_preset_table(&PresetTable::builtin()).unwrap();
    }

    #[test]
    fn rejects_version_mismatch() {
        let mut t = table(vec![]);
        t.schema_version = "0.9.0".into();
        let err = validate_preset_table(&t).unwrap_err();
        assert_eq!(err.code(), 66);
    }

    #[test]
    fn rejects_duplicate_alias_across_entries() {
        let t = table(vec![
            entry("one", &["x1"], HypothesisScores::new(1.0, 1.0, 1.0, 1.0)),
            entry("two", &["X1"], HypothesisScores::new(1.0, 1.0, 1.0, 1.0)),
        ]);
        let err = validate_preset_table(&t).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateName { ref first, .. } if first == "one"));
    }

    #[test]
    fn rejects_alias_claimed_by_builtin() {
        let t = table(vec![entry("ottonian", &["a"], HypothesisScores::new(0.3, 0.5, 0.1, 0.1))]);
        let err = validate_preset_table(&t).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateName {
                name: "a".into(),
                first: "full".into(),
                second: "ottonian".into(),
            }
        );

        // A new preset named like a built-in alias would be shadowed too.
        let t = table(vec![entry("H", &[], HypothesisScores::new(0.3, 0.5, 0.1, 0.1))]);
        assert_eq!(validate_preset_table(&t).unwrap_err().code(), 62);
    }

    #[test]
    fn override_may_reuse_builtin_name_and_aliases() {
        let t = table(vec![
            entry("FULL", &["a", "n280"], HypothesisScores::new(0.5, 0.5, 0.0, 0.0)),
            entry("loo", &[], HypothesisScores::new(0.3, 0.5, 0.1, 0.1)),
        ]);
        validate_preset_table(&t).unwrap();

        // Overriding aliases may not take another built-in's alias.
        let t = table(vec![entry("full", &["h"], HypothesisScores::new(0.5, 0.5, 0.0, 0.0))]);
        let err = validate_preset_table(&t).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateName { ref name, .. } if name == "h"));
    }

    #[test]
    fn rejects_empty_name() {
        let t = table(vec![entry("  ", &[], HypothesisScores::new(1.0, 0.0, 0.0, 0.0))]);
        assert_eq!(
            validate_preset_table(&t).unwrap_err(),
            ValidationError::MissingField("presets[0].name".into())
        );
    }

    #[test]
    fn rejects_negative_and_nan_priors() {
        let t = table(vec![entry("neg", &[], HypothesisScores::new(0.5, -0.1, 0.3, 0.3))]);
        let err = validate_preset_table(&t).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "presets.neg.priors.o"));

        let t = table(vec![entry("nan", &[], HypothesisScores::new(f64::NAN, 0.1, 0.3, 0.3))]);
        assert_eq!(validate_preset_table(&t).unwrap_err().code(), 65);
    }

    #[test]
    fn rejects_zero_sum_priors() {
        let t = table(vec![entry("zero", &[], HypothesisScores::default())]);
        assert!(matches!(
            validate_preset_table(&t).unwrap_err(),
            ValidationError::SemanticError(_)
        ));
    }

    #[test]
    fn rejects_overflowing_prior_sum() {
        let t = table(vec![entry("huge", &[], HypothesisScores::new(f64::MAX, f64::MAX, 0.0, 0.0))]);
        let err = validate_preset_table(&t).unwrap_err();
        assert!(matches!(err, ValidationError::SemanticError(ref m) if m.contains("'huge'")));
    }

    #[test]
    fn default_preset_may_name_builtin() {
        let mut t = table(vec![]);
        t.default_preset = Some("LOO".into());
        validate_preset_table(&t).unwrap();

        t.default_preset = Some("nowhere".into());
        let err = validate_preset_table(&t).unwrap_err();
        assert!(err.to_string().contains("default_preset"));
    }

    #[test]
    fn rejects_bad_default_likelihoods() {
        let mut t = table(vec![]);
        t.default_likelihoods = Some(HypothesisScores::new(0.75, f64::INFINITY, 0.07, 0.02));
        assert_eq!(validate_preset_table(&t).unwrap_err().code(), 65);

        t.default_likelihoods = Some(HypothesisScores::default());
        assert_eq!(validate_preset_table(&t).unwrap_err().code(), 63);

        t.default_likelihoods = Some(HypothesisScores::new(f64::MAX, f64::MAX, 0.07, 0.02));
        assert_eq!(validate_preset_table(&t).unwrap_err().code(), 63);
    }
}
