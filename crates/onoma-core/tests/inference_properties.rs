//! Property-based tests for posterior report and sensitivity invariants.

use onoma_common::{Hypothesis, HypothesisScores};
use onoma_core::inference::{compute_posterior, compute_sensitivity, PosteriorInput};
use proptest::prelude::*;

fn scores(range: std::ops::Range<f64>) -> impl Strategy<Value = HypothesisScores> {
    [range.clone(), range.clone(), range.clone(), range].prop_map(HypothesisScores::from_array)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    #[test]
    fn report_is_a_distribution(priors in scores(0.01..1.0), likelihoods in scores(0.01..1.0)) {
        let report = compute_posterior(&PosteriorInput::new(priors, likelihoods)).expect("valid input");

        let sum = report.posteriors.sum();
        prop_assert!((sum - 1.0).abs() < 1e-9, "sum={sum}");
        prop_assert!((report.normalized_priors.sum() - 1.0).abs() < 1e-9);
        prop_assert!((report.joint.sum() - report.evidence).abs() < 1e-12);
        for (_, p) in report.posteriors.iter() {
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn ranking_matches_posteriors(priors in scores(0.01..1.0), likelihoods in scores(0.01..1.0)) {
        let report = compute_posterior(&PosteriorInput::new(priors, likelihoods)).expect("valid input");

        prop_assert_eq!(report.ranking.len(), 4);
        prop_assert_eq!(report.ranking[0].hypothesis, report.map);
        prop_assert!(report.ranking.windows(2).all(|w| w[0].posterior >= w[1].posterior));
        for row in &report.ranking {
            prop_assert_eq!(row.posterior, report.posterior(row.hypothesis));
            let log = row.log_posterior.expect("positive posterior");
            prop_assert!((log.exp() - row.posterior).abs() < 1e-12);
        }
        let runner_up = report.ranking[1].hypothesis;
        prop_assert_eq!(report.map_evidence.runner_up, runner_up);
    }

    #[test]
    fn prior_scale_does_not_change_report(
        priors in scores(0.01..1.0),
        likelihoods in scores(0.01..1.0),
        k in 0.1..1000.0f64,
    ) {
        let base = compute_posterior(&PosteriorInput::new(priors, likelihoods)).expect("valid input");
        let scaled = compute_posterior(&PosteriorInput::new(priors.map(|p| p * k), likelihoods))
            .expect("valid input");
        for h in Hypothesis::ALL {
            prop_assert!((base.posterior(h) - scaled.posterior(h)).abs() < 1e-12);
        }
        prop_assert_eq!(base.map, scaled.map);
    }

    #[test]
    fn raising_mg_likelihood_never_lowers_mg(
        priors in scores(0.01..1.0),
        likelihoods in scores(0.01..0.5),
        bump in 0.0..0.5f64,
    ) {
        let low = compute_posterior(&PosteriorInput::new(priors, likelihoods)).expect("valid input");
        let raised = likelihoods.with(Hypothesis::Mg, likelihoods.mg + bump);
        let high = compute_posterior(&PosteriorInput::new(priors, raised)).expect("valid input");
        prop_assert!(high.posterior(Hypothesis::Mg) >= low.posterior(Hypothesis::Mg) - 1e-12);
    }

    #[test]
    fn sensitivity_cells_are_probabilities(
        prior_axis in prop::collection::vec(0.01..0.99f64, 1..6),
        likelihood_axis in prop::collection::vec(0.01..1.0f64, 1..6),
        alt in 0.01..0.5f64,
    ) {
        let matrix = compute_sensitivity(&prior_axis, &likelihood_axis, alt).expect("valid axes");
        prop_assert_eq!(matrix.cells.len(), prior_axis.len());
        for row in &matrix.cells {
            prop_assert_eq!(row.len(), likelihood_axis.len());
            for &p in row {
                prop_assert!(p > 0.0 && p < 1.0, "p={p}");
            }
        }
    }
}
