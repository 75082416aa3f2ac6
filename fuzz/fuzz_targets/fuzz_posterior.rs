//! Fuzz target for the posterior calculator.
//!
//! Arbitrary priors and likelihoods (including NaN, infinities and
//! negatives) must yield either an error or a proper distribution.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use onoma_common::HypothesisScores;
use onoma_core::inference::{compute_posterior, PosteriorInput};
use onoma_math::compute_posteriors_n;

#[derive(Debug, Arbitrary)]
struct Input {
    priors: [f64; 4],
    likelihoods: [f64; 4],
    extra_priors: Vec<f64>,
    extra_likelihoods: Vec<f64>,
}

fuzz_target!(|input: Input| {
    let request = PosteriorInput::new(
        HypothesisScores::from_array(input.priors),
        HypothesisScores::from_array(input.likelihoods),
    );
    if let Ok(report) = compute_posterior(&request) {
        let sum = report.posteriors.sum();
        assert!((sum - 1.0).abs() < 1e-6, "posteriors sum to {}", sum);
        assert!(report.posteriors.iter().all(|(_, p)| (0.0..=1.0).contains(&p)));
    }

    // Mismatched lengths must be rejected, not indexed out of bounds.
    let _ = compute_posteriors_n(&input.extra_priors, &input.extra_likelihoods);
});
