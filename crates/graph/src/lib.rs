//! Module graph validation and build plan emission
//!
//! Validation collects every cross-module violation of a loaded graph; emission
//! turns a validated graph into a deterministic [`BuildPlan`].
//!
//! [`BuildPlan`]: buildplan_core::BuildPlan

pub mod cycles;
pub mod emitter;
pub mod topology;
pub mod validation;

pub use cycles::find_cycles;
pub use emitter::{emit, plan};
pub use topology::{execution_levels, topological_order};
pub use validation::{check, validate, ValidatedGraph};
