//! Property-based tests for the posterior calculator.
//!
//! Uses proptest to verify the Bayes' rule invariants across many random inputs.

use proptest::prelude::*;
use onoma_math::{compute_posteriors, compute_posteriors_n, PosteriorError, SUM_TOLERANCE};

/// Tolerance for comparing two posterior vectors computed differently.
const TOL: f64 = 1e-12;

fn positive_weights() -> impl Strategy<Value = [f64; 4]> {
    [0.01..1.0f64, 0.01..1.0f64, 0.01..1.0f64, 0.01..1.0f64]
}

fn likelihoods() -> impl Strategy<Value = [f64; 4]> {
    [0.01..1.0f64, 0.01..1.0f64, 0.01..1.0f64, 0.01..1.0f64]
}

/// Priors that may contain zeros but always keep one strictly positive entry.
fn sparse_priors() -> impl Strategy<Value = [f64; 4]> {
    (
        [
            prop_oneof![Just(0.0), 0.0..1.0f64],
            prop_oneof![Just(0.0), 0.0..1.0f64],
            prop_oneof![Just(0.0), 0.0..1.0f64],
            prop_oneof![Just(0.0), 0.0..1.0f64],
        ],
        0usize..4,
        0.01..1.0f64,
    )
        .prop_map(|(mut priors, idx, floor)| {
            priors[idx] = priors[idx].max(floor);
            priors
        })
}

// ============================================================================
// Normalization and bounds
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Posteriors sum to one.
    #[test]
    fn posteriors_sum_to_one(priors in sparse_priors(), lik in likelihoods()) {
        let post = compute_posteriors(&priors, &lik).expect("valid input");
        let sum: f64 = post.iter().sum();
        prop_assert!((sum - 1.0).abs() <= SUM_TOLERANCE, "sum={}", sum);
    }

    /// Every posterior lies in [0, 1].
    #[test]
    fn posteriors_are_probabilities(priors in sparse_priors(), lik in likelihoods()) {
        let post = compute_posteriors(&priors, &lik).expect("valid input");
        for p in post {
            prop_assert!(p.is_finite());
            prop_assert!((0.0..=1.0).contains(&p), "p={}", p);
        }
    }

    /// A zero prior stays exactly zero after the update.
    #[test]
    fn zero_prior_stays_zero(priors in sparse_priors(), lik in likelihoods()) {
        let post = compute_posteriors(&priors, &lik).expect("valid input");
        for (prior, p) in priors.iter().zip(post) {
            if *prior == 0.0 {
                prop_assert_eq!(p, 0.0);
            }
        }
    }
}

// ============================================================================
// Scale invariance
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Multiplying all priors by k > 0 does not change the result.
    #[test]
    fn prior_scale_invariance(priors in positive_weights(), lik in likelihoods(), k in 0.001..1000.0f64) {
        let base = compute_posteriors(&priors, &lik).expect("valid input");
        let scaled_priors = priors.map(|p| p * k);
        let scaled = compute_posteriors(&scaled_priors, &lik).expect("valid input");
        for (a, b) in base.iter().zip(scaled.iter()) {
            prop_assert!((a - b).abs() <= TOL, "{} vs {} (k={})", a, b, k);
        }
    }

    /// Multiplying all likelihoods by c > 0 does not change the result either.
    #[test]
    fn likelihood_scale_invariance(priors in positive_weights(), lik in likelihoods(), c in 0.01..100.0f64) {
        let base = compute_posteriors(&priors, &lik).expect("valid input");
        let scaled = compute_posteriors(&priors, &lik.map(|l| l * c)).expect("valid input");
        for (a, b) in base.iter().zip(scaled.iter()) {
            prop_assert!((a - b).abs() <= TOL, "{} vs {} (c={})", a, b, c);
        }
    }
}

// ============================================================================
// Monotonicity
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Raising one likelihood raises that posterior and lowers all others.
    #[test]
    fn likelihood_monotonicity(
        priors in positive_weights(),
        lik in likelihoods(),
        idx in 0usize..4,
        delta in 0.01..0.5f64,
    ) {
        let before = compute_posteriors(&priors, &lik).expect("valid input");
        let mut raised = lik;
        raised[idx] += delta;
        let after = compute_posteriors(&priors, &raised).expect("valid input");

        prop_assert!(after[idx] > before[idx], "posterior[{}] did not rise", idx);
        for j in (0..4).filter(|&j| j != idx) {
            prop_assert!(after[j] < before[j], "posterior[{}] did not fall", j);
        }
    }

    /// Raising one prior weight raises that posterior.
    #[test]
    fn prior_monotonicity(
        priors in positive_weights(),
        lik in likelihoods(),
        idx in 0usize..4,
        delta in 0.01..0.5f64,
    ) {
        let before = compute_posteriors(&priors, &lik).expect("valid input");
        let mut raised = priors;
        raised[idx] += delta;
        let after = compute_posteriors(&raised, &lik).expect("valid input");
        prop_assert!(after[idx] > before[idx]);
    }
}

// ============================================================================
// Zero-likelihood boundary
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// A zero likelihood zeroes that posterior; the rest behave like a
    /// three-hypothesis model.
    #[test]
    fn zero_likelihood_reduces_model(priors in positive_weights(), lik in likelihoods(), idx in 0usize..4) {
        let mut zeroed = lik;
        zeroed[idx] = 0.0;
        let post = compute_posteriors(&priors, &zeroed).expect("valid input");
        prop_assert_eq!(post[idx], 0.0);

        let keep: Vec<usize> = (0..4).filter(|&j| j != idx).collect();
        let reduced_priors: Vec<f64> = keep.iter().map(|&j| priors[j]).collect();
        let reduced_lik: Vec<f64> = keep.iter().map(|&j| lik[j]).collect();
        let reduced = compute_posteriors_n(&reduced_priors, &reduced_lik).expect("valid input");

        for (k, &j) in keep.iter().enumerate() {
            prop_assert!((post[j] - reduced[k]).abs() <= TOL, "{} vs {}", post[j], reduced[k]);
        }
    }
}

// ============================================================================
// Rejection
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any negative prior is rejected as invalid input.
    #[test]
    fn negative_prior_rejected(priors in positive_weights(), lik in likelihoods(), idx in 0usize..4, neg in -10.0..-1e-9f64) {
        let mut bad = priors;
        bad[idx] = neg;
        let err = compute_posteriors(&bad, &lik).unwrap_err();
        let is_invalid = matches!(err, PosteriorError::InvalidInput { field: "priors", .. });
        prop_assert!(is_invalid);
    }

    /// Any negative likelihood is rejected as invalid input.
    #[test]
    fn negative_likelihood_rejected(priors in positive_weights(), lik in likelihoods(), idx in 0usize..4, neg in -10.0..-1e-9f64) {
        let mut bad = lik;
        bad[idx] = neg;
        let err = compute_posteriors(&priors, &bad).unwrap_err();
        let is_invalid = matches!(err, PosteriorError::InvalidInput { field: "likelihoods", .. });
        prop_assert!(is_invalid);
    }

    /// Inputs of the wrong length never reach the arithmetic.
    #[test]
    fn wrong_length_rejected(values in prop::collection::vec(0.01..1.0f64, 0..10)) {
        prop_assume!(values.len() != 4);
        let err = compute_posteriors(&values, &[0.5; 4]).unwrap_err();
        prop_assert!(err.is_invalid_input());
    }
}
