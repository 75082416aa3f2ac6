//! Rendering of command payloads.
//!
//! Every payload is serialized as pretty JSON for `--format json`; the
//! [`Render`] trait supplies the Markdown table and one-line summary for
//! the human formats. Probabilities are shown as percentages with one
//! decimal. `--format exitcode` renders nothing.

pub mod views;

pub use views::{ConfigView, PresetListing, PresetRow, ValidationView};

use crate::inference::{PosteriorReport, SensitivityMatrix};
use crate::scenarios::ScenarioReport;
use onoma_common::{Error, Hypothesis, OutputFormat, StructuredError};
use serde::Serialize;

/// Human renderings of a payload.
pub trait Render: Serialize {
    /// Markdown document with a heading and table(s).
    fn markdown(&self) -> String;

    /// Single line for quick checks and shell pipelines.
    fn summary(&self) -> String;
}

/// Render `value` in `format`. Empty for [`OutputFormat::Exitcode`].
pub fn render<T: Render>(value: &T, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value),
        OutputFormat::Md => Ok(value.markdown()),
        OutputFormat::Summary => Ok(value.summary()),
        OutputFormat::Exitcode => Ok(String::new()),
    }
}

/// Render an error payload for stderr.
pub fn render_error(err: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => StructuredError::from(err).to_json_pretty(),
        OutputFormat::Md => err.to_human(),
        OutputFormat::Summary => format!("error [{}]: {}", err.code(), err),
        OutputFormat::Exitcode => String::new(),
    }
}

/// `0.91063` → `"91.1%"`.
pub fn percent(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

fn table_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

fn table_rule(columns: usize) -> String {
    format!("|{}", "---|".repeat(columns))
}

impl Render for PosteriorReport {
    fn markdown(&self) -> String {
        let mut lines = vec!["# Posterior".to_string(), String::new()];
        if let Some(preset) = &self.preset {
            lines.push(format!("Preset: `{}`", preset));
            lines.push(String::new());
        }

        lines.push(table_row(&[
            "Hypothesis".into(),
            "Prior".into(),
            "P(D|H)".into(),
            "Joint".into(),
            "Posterior".into(),
        ]));
        lines.push(table_rule(5));
        for h in Hypothesis::ALL {
            lines.push(table_row(&[
                h.label().to_string(),
                percent(self.normalized_priors.get(h)),
                format!("{:.3}", self.input.likelihoods.get(h)),
                format!("{:.4}", self.joint.get(h)),
                percent(self.posteriors.get(h)),
            ]));
        }

        lines.push(String::new());
        lines.push(format!("P(D) = {:.4}", self.evidence));
        lines.push(format!(
            "MAP: **{}** ({}); likelihood ratio against {}: {:.2} ({})",
            self.map.label(),
            percent(self.posterior(self.map)),
            self.map_evidence.runner_up.code(),
            self.map_evidence.bayes_factor,
            self.map_evidence.strength,
        ));

        if !self.warnings.is_empty() {
            lines.push(String::new());
            lines.push("## Warnings".to_string());
            lines.push(String::new());
            lines.extend(self.warnings.iter().map(|w| format!("- {}", w)));
        }
        lines.join("\n")
    }

    fn summary(&self) -> String {
        let parts: Vec<String> = Hypothesis::ALL
            .iter()
            .map(|&h| format!("{}={}", h.code(), percent(self.posteriors.get(h))))
            .collect();
        let mut line = format!("MAP {} {}", self.map.code(), parts.join(" "));
        if let Some(preset) = &self.preset {
            line.push_str(&format!(" (preset {})", preset));
        }
        line
    }
}

impl Render for SensitivityMatrix {
    fn markdown(&self) -> String {
        let mut lines = vec![
            "# Sensitivity of P(Mg|D)".to_string(),
            String::new(),
            format!(
                "Pooled approximation with P(D|not Mg) = {}.",
                self.alt_likelihood
            ),
            String::new(),
        ];

        let mut header = vec!["Prior(Mg) \\ P(D|Mg)".to_string()];
        header.extend(self.likelihood_axis.iter().map(|l| format!("{:.2}", l)));
        lines.push(table_row(&header));
        lines.push(table_rule(header.len()));

        for (prior, row) in self.prior_axis.iter().zip(&self.cells) {
            let mut cells = vec![format!("{:.3}", prior)];
            cells.extend(row.iter().map(|&p| percent(p)));
            lines.push(table_row(&cells));
        }
        lines.join("\n")
    }

    fn summary(&self) -> String {
        let all = self.cells.iter().flatten().copied();
        let (min, max) = all.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p), hi.max(p))
        });
        format!(
            "sensitivity {}x{} P(Mg|D) {}..{}",
            self.prior_axis.len(),
            self.likelihood_axis.len(),
            percent(min),
            percent(max)
        )
    }
}

impl Render for ScenarioReport {
    fn markdown(&self) -> String {
        let mut lines = vec!["# Published scenarios".to_string(), String::new()];
        lines.push(table_row(&[
            "Scenario".into(),
            "Preset".into(),
            "Prior(Mg)".into(),
            "P(D|Mg)".into(),
            "Reported".into(),
            "Computed".into(),
            "Δ pp".into(),
            "Match".into(),
        ]));
        lines.push(table_rule(8));
        for check in &self.checks {
            lines.push(table_row(&[
                format!("{} ({})", check.id, check.title),
                check.preset.clone(),
                format!("{:.3}", check.prior_mg),
                format!("{:.2}", check.likelihood_mg),
                format!("{:.0}%", check.reported_pct),
                format!("{:.1}%", check.computed_pct),
                format!("{:+.1}", check.difference_pp),
                if check.matches { "✓" } else { "✗" }.to_string(),
            ]));
        }

        let notes: Vec<String> = self
            .checks
            .iter()
            .filter_map(|c| c.note.as_ref().map(|n| format!("- {}: {}", c.id, n)))
            .collect();
        if !notes.is_empty() {
            lines.push(String::new());
            lines.extend(notes);
        }

        lines.push(String::new());
        lines.push(format!("Tolerance: ±{} pp", self.tolerance_pp));
        lines.join("\n")
    }

    fn summary(&self) -> String {
        let matched = self.checks.iter().filter(|c| c.matches).count();
        let mut line = format!("scenarios {}/{} within ±{} pp", matched, self.checks.len(), self.tolerance_pp);
        let mismatched: Vec<&str> = self.mismatches().map(|c| c.id.as_str()).collect();
        if !mismatched.is_empty() {
            line.push_str(&format!("; mismatched: {}", mismatched.join(", ")));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{compute_posterior, default_sensitivity, PosteriorInput};
    use crate::scenarios::reproduce;
    use onoma_common::HypothesisScores;
    use onoma_config::PresetTable;

    fn full_sample() -> PosteriorReport {
        compute_posterior(&PosteriorInput::new(
            HypothesisScores::new(0.552, 0.393, 0.005, 0.050),
            HypothesisScores::new(0.75, 0.10, 0.07, 0.02),
        ))
        .unwrap()
        .with_preset("full")
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(percent(0.91063), "91.1%");
        assert_eq!(percent(0.0), "0.0%");
        assert_eq!(percent(1.0), "100.0%");
    }

    #[test]
    fn posterior_markdown_table() {
        let md = full_sample().markdown();
        assert!(md.starts_with("# Posterior"));
        assert!(md.contains("| Hypothesis | Prior | P(D|H) | Joint | Posterior |"));
        assert!(md.contains("| Mg (Mojmirid) | 55.2% | 0.750 |"));
        assert!(md.contains("91.1%"));
        assert!(md.contains("Preset: `full`"));
        assert!(!md.contains("## Warnings"));
    }

    #[test]
    fn posterior_summary_line() {
        let line = full_sample().summary();
        assert!(line.starts_with("MAP Mg Mg=91.1% O="));
        assert!(line.ends_with("(preset full)"));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn sensitivity_markdown_uses_axes() {
        let md = default_sensitivity().unwrap().markdown();
        assert!(md.contains("| Prior(Mg) \\ P(D|Mg) | 0.40 | 0.50 | 0.60 | 0.70 | 0.75 |"));
        assert!(md.contains("| 0.085 |"));
        assert!(md.contains("| 0.552 |"));
        assert_eq!(md.lines().filter(|l| l.starts_with("| 0.")).count(), 4);
    }

    #[test]
    fn scenario_summary_reports_matches() {
        let report = reproduce(&PresetTable::builtin()).unwrap();
        assert_eq!(report.summary(), "scenarios 4/4 within ±1 pp");
        let md = report.markdown();
        assert!(md.contains("| H (Unconditional) | unconditional |"));
        assert!(md.contains("- H: paternal hypothesis O dominates"));
    }

    #[test]
    fn json_and_exitcode_formats() {
        let report = full_sample();
        let json = render(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["map"], "mg");
        assert!(render(&report, OutputFormat::Exitcode).unwrap().is_empty());
    }

    #[test]
    fn error_rendering_follows_format() {
        let err = Error::DegenerateResult("every joint weight is zero".into());
        let json: serde_json::Value = serde_json::from_str(&render_error(&err, OutputFormat::Json)).unwrap();
        assert_eq!(json["code"], 30);
        assert_eq!(json["category"], "inference");
        assert!(render_error(&err, OutputFormat::Md).starts_with("✗ Degenerate Result"));
        assert_eq!(
            render_error(&err, OutputFormat::Summary),
            "error [30]: degenerate result: every joint weight is zero"
        );
        assert!(render_error(&err, OutputFormat::Exitcode).is_empty());
    }
}
