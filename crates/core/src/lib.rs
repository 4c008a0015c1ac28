//! Core domain types, errors, and constants for `buildplan`.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias, plus the `Violation`
//!   taxonomy reported by loading and validation.
//! - **`types`**: modules, dependency references, the module graph and the
//!   build plan.
//! - **`constants`**: file names, environment variable names and defaults.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result, ResultExt, Violation, Violations},
    types::*,
};
