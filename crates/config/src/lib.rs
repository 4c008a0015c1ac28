//! Descriptor loading for buildplan
//!
//! This crate reads module descriptors (in memory or from JSON/TOML files)
//! and turns them into an immutable [`ModuleGraph`](buildplan_core::ModuleGraph).

pub mod loader;
pub mod options;
pub mod parser;

pub use loader::*;
pub use options::*;
pub use parser::*;
