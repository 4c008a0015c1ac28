//! Core domain types for `buildplan`.
//!
//! ## Organization
//!
//! - **`newtypes`**: validated module names and external coordinates
//! - **`version`**: toolchain version floors
//! - **`module`**: modules, dependency references, test suites and reports
//! - **`graph`**: the loaded module graph and version catalog
//! - **`plan`**: the build plan produced from a validated graph

pub mod graph;
pub mod module;
pub mod newtypes;
pub mod plan;
pub mod version;

pub use graph::*;
pub use module::*;
pub use newtypes::*;
pub use plan::*;
pub use version::*;
