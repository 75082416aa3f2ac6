//! Core math modules.

pub mod bayes_factor;
pub mod pooled;
pub mod posterior;
