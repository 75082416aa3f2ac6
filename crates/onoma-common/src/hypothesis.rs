//! The name-origin hypothesis set.
//!
//! Four mutually exclusive, exhaustive explanations for how a dynast came
//! to carry a given personal name:
//! - `Mg`: maternal genealogical inheritance (a grandmother's lineage)
//! - `O`: paternal inheritance from an unidentified ancestor
//! - `Sp`: political or alliance prestige (a territorial eponym)
//! - `R`: a dynastic, newly coined or traditional name
//!
//! The ordering of [`Hypothesis::ALL`] is the canonical order used by every
//! array-shaped input and output in the workspace.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of hypotheses in the model.
pub const HYPOTHESIS_COUNT: usize = 4;

/// One name-origin hypothesis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Hypothesis {
    /// Maternal genealogical (Mojmirid grandmother).
    Mg,
    /// Paternal (unidentified ancestor).
    O,
    /// Political/alliance prestige (territorial eponym).
    Sp,
    /// Dynastic (newly coined or traditional).
    R,
}

impl Hypothesis {
    /// All hypotheses in canonical order.
    pub const ALL: [Hypothesis; HYPOTHESIS_COUNT] =
        [Hypothesis::Mg, Hypothesis::O, Hypothesis::Sp, Hypothesis::R];

    /// Position in canonical order.
    pub fn index(self) -> usize {
        match self {
            Hypothesis::Mg => 0,
            Hypothesis::O => 1,
            Hypothesis::Sp => 2,
            Hypothesis::R => 3,
        }
    }

    /// Short identifier as used in the literature.
    pub fn code(self) -> &'static str {
        match self {
            Hypothesis::Mg => "Mg",
            Hypothesis::O => "O",
            Hypothesis::Sp => "Sp",
            Hypothesis::R => "R",
        }
    }

    /// Table label.
    pub fn label(self) -> &'static str {
        match self {
            Hypothesis::Mg => "Mg (Mojmirid)",
            Hypothesis::O => "O (Paternal)",
            Hypothesis::Sp => "Sp (Political)",
            Hypothesis::R => "R (Dynastic)",
        }
    }

    /// One-line description of the hypothesis.
    pub fn description(self) -> &'static str {
        match self {
            Hypothesis::Mg => "Maternal genealogical: inherited through a Mojmirid grandmother",
            Hypothesis::O => "Paternal: inherited from an unidentified paternal ancestor",
            Hypothesis::Sp => "Political: a declaration of claim through a territorial eponym",
            Hypothesis::R => "Dynastic: a newly coined or traditional house name",
        }
    }

    /// Parse a hypothesis code (case-insensitive).
    pub fn parse(s: &str) -> Option<Hypothesis> {
        match s.trim().to_lowercase().as_str() {
            "mg" | "maternal" => Some(Hypothesis::Mg),
            "o" | "paternal" => Some(Hypothesis::O),
            "sp" | "political" => Some(Hypothesis::Sp),
            "r" | "dynastic" => Some(Hypothesis::R),
            _ => None,
        }
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Per-hypothesis scores in canonical order.
///
/// Used for prior weights, likelihoods, joint weights and posteriors alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HypothesisScores {
    pub mg: f64,
    pub o: f64,
    pub sp: f64,
    pub r: f64,
}

impl HypothesisScores {
    pub const fn new(mg: f64, o: f64, sp: f64, r: f64) -> Self {
        Self { mg, o, sp, r }
    }

    pub fn from_array(values: [f64; HYPOTHESIS_COUNT]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }

    pub fn as_array(&self) -> [f64; HYPOTHESIS_COUNT] {
        [self.mg, self.o, self.sp, self.r]
    }

    /// Score for a single hypothesis.
    pub fn get(&self, hypothesis: Hypothesis) -> f64 {
        match hypothesis {
            Hypothesis::Mg => self.mg,
            Hypothesis::O => self.o,
            Hypothesis::Sp => self.sp,
            Hypothesis::R => self.r,
        }
    }

    /// Replace the score for a single hypothesis.
    pub fn with(mut self, hypothesis: Hypothesis, value: f64) -> Self {
        match hypothesis {
            Hypothesis::Mg => self.mg = value,
            Hypothesis::O => self.o = value,
            Hypothesis::Sp => self.sp = value,
            Hypothesis::R => self.r = value,
        }
        self
    }

    /// Apply `f` to every score.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.mg), f(self.o), f(self.sp), f(self.r))
    }

    pub fn sum(&self) -> f64 {
        self.mg + self.o + self.sp + self.r
    }

    /// Iterate `(hypothesis, score)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Hypothesis, f64)> + '_ {
        Hypothesis::ALL.into_iter().map(move |h| (h, self.get(h)))
    }

    /// Hypotheses sorted by descending score; ties keep canonical order.
    pub fn ranked(&self) -> Vec<(Hypothesis, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// Parse four comma-separated numbers, e.g. `"0.552,0.393,0.005,0.05"`.
    pub fn parse_csv(s: &str) -> Result<Self, String> {
        let values = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|_| format!("not a number: '{}'", part))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let array: [f64; HYPOTHESIS_COUNT] = values.as_slice().try_into().map_err(|_| {
            format!(
                "expected {} comma-separated values (Mg,O,Sp,R), got {}",
                HYPOTHESIS_COUNT,
                values.len()
            )
        })?;
        Ok(Self::from_array(array))
    }
}

impl From<[f64; HYPOTHESIS_COUNT]> for HypothesisScores {
    fn from(values: [f64; HYPOTHESIS_COUNT]) -> Self {
        Self::from_array(values)
    }
}

impl std::str::FromStr for HypothesisScores {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_csv(s)
    }
}
