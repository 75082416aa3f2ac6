//! Reproduction of the published scenarios.
//!
//! Each scenario is recomputed with the exact calculator using the
//! current preset table, so an overridden preset shows up as a mismatch.

use crate::inference::{compute_posterior, to_error, PosteriorInput};
use onoma_common::{Error, Hypothesis, SCHEMA_VERSION};
use onoma_config::{PresetTable, Scenario, ARTICLE_SCENARIOS, DEFAULT_LIKELIHOODS};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::{debug, warn};

/// Allowed gap between computed and reported posterior, in percentage points.
pub const SCENARIO_TOLERANCE_PP: f64 = 1.0;

/// Outcome for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ScenarioCheck {
    pub id: String,
    pub title: String,
    pub preset: String,
    pub prior_mg: f64,
    pub likelihood_mg: f64,
    /// Published posterior for Mg, percent.
    pub reported_pct: f64,
    /// Computed posterior for Mg, percent, one decimal.
    pub computed_pct: f64,
    /// `computed_pct - reported_pct`.
    pub difference_pp: f64,
    pub matches: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// All scenario checks.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ScenarioReport {
    pub schema_version: String,
    pub tolerance_pp: f64,
    pub checks: Vec<ScenarioCheck>,
    pub all_match: bool,
}

impl ScenarioReport {
    pub fn mismatches(&self) -> impl Iterator<Item = &ScenarioCheck> {
        self.checks.iter().filter(|c| !c.matches)
    }
}

fn round1(pct: f64) -> f64 {
    (pct * 10.0).round() / 10.0
}

/// Recompute every published scenario against `table`.
pub fn reproduce(table: &PresetTable) -> Result<ScenarioReport, Error> {
    reproduce_scenarios(table, &ARTICLE_SCENARIOS)
}

/// Recompute the given scenarios, in the order given.
pub fn reproduce_scenarios<'a>(
    table: &PresetTable,
    scenarios: impl IntoIterator<Item = &'a Scenario>,
) -> Result<ScenarioReport, Error> {
    let mut checks = Vec::new();

    for scenario in scenarios {
        let entry = table.resolve(scenario.preset.as_str())?;
        let likelihoods = DEFAULT_LIKELIHOODS.with(Hypothesis::Mg, scenario.likelihood_mg);
        let report = compute_posterior(&PosteriorInput::new(entry.priors, likelihoods)).map_err(to_error)?;

        let computed_pct = round1(report.posterior(Hypothesis::Mg) * 100.0);
        let difference_pp = round1(computed_pct - scenario.reported_posterior_mg_pct);
        let matches = difference_pp.abs() <= SCENARIO_TOLERANCE_PP;

        if matches {
            debug!(target: "analyze.scenario_checked", id = scenario.id, computed_pct, "scenario reproduced");
        } else {
            warn!(
                target: "analyze.scenario_mismatch",
                id = scenario.id,
                computed_pct,
                reported_pct = scenario.reported_posterior_mg_pct,
                "scenario outside tolerance"
            );
        }

        checks.push(ScenarioCheck {
            id: scenario.id.to_string(),
            title: scenario.title.to_string(),
            preset: entry.name.clone(),
            prior_mg: entry.priors.mg,
            likelihood_mg: scenario.likelihood_mg,
            reported_pct: scenario.reported_posterior_mg_pct,
            computed_pct,
            difference_pp,
            matches,
            note: scenario.note.map(str::to_string),
        });
    }

    let all_match = checks.iter().all(|c| c.matches);
    Ok(ScenarioReport {
        schema_version: SCHEMA_VERSION.to_string(),
        tolerance_pp: SCENARIO_TOLERANCE_PP,
        checks,
        all_match,
    })
}
