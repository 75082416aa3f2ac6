//! Posterior computation over the four name-origin hypotheses.
//!
//! Wraps [`onoma_math::posterior_breakdown`] with named scores and adds the
//! derived quantities a reader of the result wants: the ranking, log
//! posteriors, the MAP hypothesis and how strongly the data separate it
//! from the runner-up.

use onoma_common::{Hypothesis, HypothesisScores, SCHEMA_VERSION};
use onoma_config::check_ranges;
use onoma_math::{posterior_breakdown, EvidenceDirection, EvidenceSummary, PosteriorError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Priors and likelihoods for one computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PosteriorInput {
    /// Unnormalized prior weights.
    pub priors: HypothesisScores,
    /// P(D|H) per hypothesis.
    pub likelihoods: HypothesisScores,
}

impl PosteriorInput {
    pub fn new(priors: HypothesisScores, likelihoods: HypothesisScores) -> Self {
        Self { priors, likelihoods }
    }
}

/// One row of the ranking, highest posterior first.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct RankedHypothesis {
    pub hypothesis: Hypothesis,
    pub posterior: f64,
    /// ln(posterior); absent for an exact-zero posterior.
    pub log_posterior: Option<f64>,
}

/// Likelihood-ratio comparison of the MAP hypothesis with the runner-up.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct MapEvidence {
    pub map: Hypothesis,
    pub runner_up: Hypothesis,
    /// ln(P(D|map) / P(D|runner_up)); absent when the ratio is unbounded
    /// or undefined.
    pub log_bayes_factor: Option<f64>,
    /// Clamped ratio.
    pub bayes_factor: f64,
    pub delta_bits: Option<f64>,
    /// Jeffreys-scale label.
    pub strength: String,
    /// Whether the likelihoods favor the MAP hypothesis, the runner-up,
    /// or neither. Prior weight can make the MAP hypothesis win even when
    /// its likelihood is lower.
    pub favors: String,
}

impl MapEvidence {
    fn new(map: Hypothesis, runner_up: Hypothesis, likelihoods: &HypothesisScores) -> Self {
        let summary = EvidenceSummary::from_likelihoods(likelihoods.get(map), likelihoods.get(runner_up));
        let finite = |v: f64| v.is_finite().then_some(v);
        let favors = match summary.direction {
            EvidenceDirection::FavorsFirst => map.code(),
            EvidenceDirection::FavorsSecond => runner_up.code(),
            EvidenceDirection::Neutral => "neither",
        }
        .to_string();
        MapEvidence {
            map,
            runner_up,
            log_bayes_factor: finite(summary.log_bf),
            bayes_factor: summary.bayes_factor,
            delta_bits: finite(summary.delta_bits),
            strength: summary.strength.label().to_string(),
            favors,
        }
    }
}

/// Full result of one posterior computation.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PosteriorReport {
    pub schema_version: String,
    /// Preset the priors came from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    pub input: PosteriorInput,
    pub normalized_priors: HypothesisScores,
    /// Normalized prior times likelihood.
    pub joint: HypothesisScores,
    /// P(D), the sum of the joint weights.
    pub evidence: f64,
    pub posteriors: HypothesisScores,
    pub ranking: Vec<RankedHypothesis>,
    /// Maximum a posteriori hypothesis; ties go to the earlier hypothesis.
    pub map: Hypothesis,
    pub map_evidence: MapEvidence,
    /// Inputs outside their recommended ranges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl PosteriorReport {
    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    /// Posterior for one hypothesis.
    pub fn posterior(&self, hypothesis: Hypothesis) -> f64 {
        self.posteriors.get(hypothesis)
    }
}

/// Compute posteriors and the derived report.
///
/// Fails with [`PosteriorError::InvalidInput`] for negative or non-finite
/// values or zero-sum priors, and with [`PosteriorError::DegenerateResult`]
/// when no hypothesis has any joint weight.
pub fn compute_posterior(input: &PosteriorInput) -> Result<PosteriorReport, PosteriorError> {
    let breakdown = posterior_breakdown(&input.priors.as_array(), &input.likelihoods.as_array())?;

    let scores = |values: &[f64]| HypothesisScores::new(values[0], values[1], values[2], values[3]);
    let posteriors = scores(&breakdown.posteriors);

    let ranking: Vec<RankedHypothesis> = posteriors
        .ranked()
        .into_iter()
        .map(|(hypothesis, posterior)| RankedHypothesis {
            hypothesis,
            posterior,
            log_posterior: (posterior > 0.0).then(|| posterior.ln()),
        })
        .collect();
    let map = ranking[0].hypothesis;
    let runner_up = ranking[1].hypothesis;

    let warnings = check_ranges(&input.priors, &input.likelihoods)
        .iter()
        .map(|w| w.to_string())
        .collect();

    debug!(
        target: "infer.posterior",
        map = %map,
        map_posterior = posteriors.get(map),
        evidence = breakdown.evidence,
        "posterior computed"
    );

    Ok(PosteriorReport {
        schema_version: SCHEMA_VERSION.to_string(),
        preset: None,
        input: *input,
        normalized_priors: scores(&breakdown.normalized_priors),
        joint: scores(&breakdown.joint),
        evidence: breakdown.evidence,
        posteriors,
        ranking,
        map,
        map_evidence: MapEvidence::new(map, runner_up, &input.likelihoods),
        warnings,
    })
}
