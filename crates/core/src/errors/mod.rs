//! Error types and result extensions for buildplan operations

mod builders;
mod conversions;
mod display;
mod extensions;
mod types;
mod violation;

pub use extensions::*;
pub use types::{Error, Result};
pub use violation::{Violation, Violations};
