//! Fuzz target for comma-separated score parsing (`--priors`, `--likelihoods`).

#![no_main]

use libfuzzer_sys::fuzz_target;
use onoma_common::HypothesisScores;

fuzz_target!(|data: &str| {
    let _ = HypothesisScores::parse_csv(data);
});
