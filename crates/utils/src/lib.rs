//! Shared utilities for buildplan
//!
//! Descriptor file discovery and tracing setup used by the loader and the CLI.

pub mod paths;
pub mod tracing;

pub use paths::*;
