//! Built-in prior presets.
//!
//! Each preset is a set of prior weights (Mg, O, Sp, R) estimated from a
//! different reference sample of dynastic naming:
//! - Full: the whole sample (n=280, including Carolingians)
//! - Xw: 10th-century cases only
//! - LOO: leave-one-out, excluding the Piasts themselves
//! - Unconditional: base rates without conditioning on maternal links
//! - Custom: a flat starting point for manual adjustment

use onoma_common::HypothesisScores;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Available built-in presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    /// Full sample, n=280 (scenario A)
    Full,
    /// 10th century only (scenario Xw)
    Xw,
    /// Leave-one-out, excluding Piasts (scenario LOO)
    Loo,
    /// Unconditional base rates (scenario H)
    Unconditional,
    /// Flat starting point for manual adjustment
    Custom,
}

impl PresetName {
    /// All available preset names.
    pub const ALL: &'static [PresetName] = &[
        PresetName::Full,
        PresetName::Xw,
        PresetName::Loo,
        PresetName::Unconditional,
        PresetName::Custom,
    ];

    /// Get preset name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetName::Full => "full",
            PresetName::Xw => "xw",
            PresetName::Loo => "loo",
            PresetName::Unconditional => "unconditional",
            PresetName::Custom => "custom",
        }
    }

    /// Alternative spellings accepted by [`PresetName::parse`].
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            PresetName::Full => &["a", "full-sample", "n280"],
            PresetName::Xw => &["10th", "tenth-century", "x"],
            PresetName::Loo => &["leave-one-out", "no-piasts"],
            PresetName::Unconditional => &["h", "uncond"],
            PresetName::Custom => &[],
        }
    }

    /// Parse preset name from string.
    pub fn parse(s: &str) -> Option<PresetName> {
        let s = s.trim().to_lowercase();
        PresetName::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s || p.aliases().contains(&s.as_str()))
    }

    /// Display label for tables.
    pub fn label(&self) -> &'static str {
        match self {
            PresetName::Full => "Full sample n=280 (A)",
            PresetName::Xw => "10th century only (Xw)",
            PresetName::Loo => "LOO (excluding Piasts)",
            PresetName::Unconditional => "Unconditional (H)",
            PresetName::Custom => "Custom",
        }
    }

    /// Get a description of the preset.
    pub fn description(&self) -> &'static str {
        match self {
            PresetName::Full => "Empirical rates from the full reference sample, Carolingians included",
            PresetName::Xw => "Empirical rates restricted to 10th-century naming cases",
            PresetName::Loo => "Full sample with the Piast dynasty left out",
            PresetName::Unconditional => {
                "Base rates not conditioned on a documented maternal link; paternal naming dominates"
            }
            PresetName::Custom => "Flat starting point for manual adjustment",
        }
    }

    /// Prior weights in canonical order (Mg, O, Sp, R).
    pub fn priors(&self) -> HypothesisScores {
        match self {
            PresetName::Full => HypothesisScores::new(0.552, 0.393, 0.005, 0.050),
            PresetName::Xw => HypothesisScores::new(0.417, 0.450, 0.005, 0.128),
            PresetName::Loo => HypothesisScores::new(0.356, 0.470, 0.005, 0.169),
            PresetName::Unconditional => HypothesisScores::new(0.085, 0.812, 0.045, 0.058),
            PresetName::Custom => HypothesisScores::new(0.400, 0.400, 0.100, 0.100),
        }
    }
}

impl Default for PresetName {
    fn default() -> Self {
        PresetName::Full
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PresetName {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetName::parse(s).ok_or_else(|| PresetError::UnknownPreset {
            name: s.to_string(),
            available: PresetName::ALL.iter().map(|p| p.as_str().to_string()).collect(),
        })
    }
}

/// Errors related to preset lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum PresetError {
    /// Unknown preset name.
    UnknownPreset {
        name: String,
        available: Vec<String>,
    },
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::UnknownPreset { name, available } => {
                write!(
                    f,
                    "Unknown preset '{}'. Available: {}",
                    name,
                    available.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for PresetError {}

impl From<PresetError> for onoma_common::Error {
    fn from(err: PresetError) -> Self {
        match err {
            PresetError::UnknownPreset { name, available } => onoma_common::Error::UnknownPreset(
                format!("'{}' (available: {})", name, available.join(", ")),
            ),
        }
    }
}
