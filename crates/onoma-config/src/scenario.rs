//! Reference scenarios published with the model.
//!
//! Each scenario pairs a prior preset with P(D|Mg) = 0.75 (other
//! likelihoods at their defaults) and records the posterior for Mg that
//! was reported for it, rounded to whole percent.

use crate::preset::PresetName;
use serde::Serialize;

/// One published scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scenario {
    /// Short identifier used in the publication.
    pub id: &'static str,
    pub title: &'static str,
    pub preset: PresetName,
    /// P(D|Mg) used for the scenario.
    pub likelihood_mg: f64,
    /// Reported posterior for Mg, in percent.
    pub reported_posterior_mg_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// The four published scenarios, in publication order.
pub const ARTICLE_SCENARIOS: [Scenario; 4] = [
    Scenario {
        id: "A",
        title: "Full empirical sample (n=280)",
        preset: PresetName::Full,
        likelihood_mg: 0.75,
        reported_posterior_mg_pct: 91.0,
        note: None,
    },
    Scenario {
        id: "LOO",
        title: "Leave-one-out",
        preset: PresetName::Loo,
        likelihood_mg: 0.75,
        reported_posterior_mg_pct: 84.0,
        note: None,
    },
    Scenario {
        id: "Xw",
        title: "10th century",
        preset: PresetName::Xw,
        likelihood_mg: 0.75,
        reported_posterior_mg_pct: 87.0,
        note: None,
    },
    Scenario {
        id: "H",
        title: "Unconditional",
        preset: PresetName::Unconditional,
        likelihood_mg: 0.75,
        reported_posterior_mg_pct: 43.0,
        note: Some("paternal hypothesis O dominates"),
    },
];

/// Look up a scenario by id (case-insensitive).
pub fn find_scenario(id: &str) -> Option<&'static Scenario> {
    ARTICLE_SCENARIOS
        .iter()
        .find(|s| s.id.eq_ignore_ascii_case(id.trim()))
}
