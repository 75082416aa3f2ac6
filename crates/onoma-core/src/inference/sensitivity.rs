//! Sensitivity of the Mg posterior to its prior and likelihood.
//!
//! Uses the pooled two-hypothesis shortcut from
//! [`onoma_math::pooled_binary_posterior`], not the exact four-way
//! calculator, so the cells are approximations and will not match
//! `calc` output for the same prior.

use onoma_common::SCHEMA_VERSION;
use onoma_math::{pooled_binary_posterior, PosteriorError, POOLED_ALT_LIKELIHOOD};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::debug;

/// Prior(Mg) rows: unconditional, LOO, 10th century, full sample.
pub const DEFAULT_PRIOR_AXIS: [f64; 4] = [0.085, 0.356, 0.417, 0.552];

/// P(D|Mg) columns.
pub const DEFAULT_LIKELIHOOD_AXIS: [f64; 5] = [0.4, 0.5, 0.6, 0.7, 0.75];

/// Grid of pooled posteriors for Mg.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SensitivityMatrix {
    pub schema_version: String,
    /// Likelihood shared by the pooled alternatives.
    pub alt_likelihood: f64,
    /// Prior(Mg) for each row.
    pub prior_axis: Vec<f64>,
    /// P(D|Mg) for each column.
    pub likelihood_axis: Vec<f64>,
    /// `cells[row][col]` is the pooled posterior for Mg.
    pub cells: Vec<Vec<f64>>,
}

impl SensitivityMatrix {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }
}

fn invalid(field: &'static str, message: String) -> PosteriorError {
    PosteriorError::InvalidInput { field, message }
}

fn check_axis(
    values: &[f64],
    field: &'static str,
    valid: impl Fn(f64) -> bool,
    expected: &str,
) -> Result<(), PosteriorError> {
    if values.is_empty() {
        return Err(invalid(field, "must not be empty".to_string()));
    }
    if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !valid(**v)) {
        return Err(invalid(field, format!("[{}] must be {}, got {}", i, expected, v)));
    }
    Ok(())
}

/// Build the sensitivity grid.
///
/// Rows follow `prior_axis`, columns follow `likelihood_axis`.
pub fn compute_sensitivity(
    prior_axis: &[f64],
    likelihood_axis: &[f64],
    alt_likelihood: f64,
) -> Result<SensitivityMatrix, PosteriorError> {
    check_axis(prior_axis, "prior_axis", |v| (0.0..=1.0).contains(&v), "in [0, 1]")?;
    check_axis(
        likelihood_axis,
        "likelihood_axis",
        |v| v.is_finite() && v >= 0.0,
        "finite and non-negative",
    )?;
    if !alt_likelihood.is_finite() || alt_likelihood < 0.0 {
        return Err(invalid(
            "alt_likelihood",
            format!("must be finite and non-negative, got {}", alt_likelihood),
        ));
    }

    let mut cells = Vec::with_capacity(prior_axis.len());
    for &prior in prior_axis {
        let row = likelihood_axis
            .iter()
            .map(|&l| pooled_binary_posterior(prior, l, alt_likelihood))
            .collect::<Option<Vec<f64>>>()
            // Inputs are validated, so only a zero denominator is left.
            .ok_or(PosteriorError::DegenerateResult)?;
        cells.push(row);
    }

    debug!(
        target: "analyze.sensitivity",
        rows = prior_axis.len(),
        cols = likelihood_axis.len(),
        alt_likelihood,
        "sensitivity grid computed"
    );

    Ok(SensitivityMatrix {
        schema_version: SCHEMA_VERSION.to_string(),
        alt_likelihood,
        prior_axis: prior_axis.to_vec(),
        likelihood_axis: likelihood_axis.to_vec(),
        cells,
    })
}

/// The grid with the default axes and pooled likelihood.
pub fn default_sensitivity() -> Result<SensitivityMatrix, PosteriorError> {
    compute_sensitivity(&DEFAULT_PRIOR_AXIS, &DEFAULT_LIKELIHOOD_AXIS, POOLED_ALT_LIKELIHOOD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_shape_and_corner() {
        let m = default_sensitivity().unwrap();
        assert_eq!(m.cells.len(), 4);
        assert!(m.cells.iter().all(|r| r.len() == 5));
        // 0.552*0.75 / (0.552*0.75 + 0.448*0.08)
        let expected = 0.414 / (0.414 + 0.448 * 0.08);
        assert!((m.get(3, 4).unwrap() - expected).abs() < 1e-12);
        assert!(m.get(4, 0).is_none());
    }

    #[test]
    fn monotone_in_both_axes() {
        let m = default_sensitivity().unwrap();
        for row in &m.cells {
            assert!(row.windows(2).all(|w| w[0] < w[1]));
        }
        for col in 0..m.likelihood_axis.len() {
            let column: Vec<f64> = m.cells.iter().map(|r| r[col]).collect();
            assert!(column.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn rejects_bad_axes() {
        assert!(compute_sensitivity(&[], &[0.5], 0.08).unwrap_err().is_invalid_input());
        assert!(compute_sensitivity(&[1.5], &[0.5], 0.08).unwrap_err().is_invalid_input());
        assert!(compute_sensitivity(&[0.5], &[-0.1], 0.08).unwrap_err().is_invalid_input());
        assert!(compute_sensitivity(&[0.5], &[f64::NAN], 0.08).unwrap_err().is_invalid_input());
        assert!(compute_sensitivity(&[0.5], &[0.5], -1.0).unwrap_err().is_invalid_input());
    }

    #[test]
    fn zero_denominator_is_degenerate() {
        let err = compute_sensitivity(&[1.0], &[0.0], 0.08).unwrap_err();
        assert_eq!(err, PosteriorError::DegenerateResult);
    }
}
