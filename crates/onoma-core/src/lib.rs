//! Onoma Core Library
//!
//! This library provides the core functionality of the name-origin
//! posterior calculator:
//! - Posterior reports and the sensitivity grid
//! - Reproduction of the published scenarios
//! - Preset table loading and validation
//! - Exit codes, logging and output rendering for the CLI
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod exit_codes;
pub mod inference;
pub mod logging;
pub mod output;
pub mod scenarios;
pub mod schema;
