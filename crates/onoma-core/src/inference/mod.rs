//! Inference over the name-origin hypotheses.

pub mod posterior;
pub mod sensitivity;

pub use posterior::{compute_posterior, MapEvidence, PosteriorInput, PosteriorReport, RankedHypothesis};
pub use sensitivity::{
    compute_sensitivity, default_sensitivity, SensitivityMatrix, DEFAULT_LIKELIHOOD_AXIS,
    DEFAULT_PRIOR_AXIS,
};

use onoma_common::Error;
use onoma_math::PosteriorError;

// Reports convert calculator arrays into `HypothesisScores` by position.
const _: () = assert!(onoma_common::HYPOTHESIS_COUNT == onoma_math::HYPOTHESIS_COUNT);

/// Lift a calculator error into the CLI error type.
pub fn to_error(err: PosteriorError) -> Error {
    match err {
        PosteriorError::InvalidInput { field, message } => {
            Error::InvalidInput(format!("{}: {}", field, message))
        }
        PosteriorError::DegenerateResult => Error::DegenerateResult(
            "every joint weight is zero; give at least one hypothesis positive prior and likelihood"
                .to_string(),
        ),
    }
}
