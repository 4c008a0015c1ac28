//! Descriptor document types

mod raw;

pub use raw::{RawDependency, RawDescriptor, RawReport, RawTestSuite};
pub(crate) use raw::{RawCatalogEntry, RawCatalogFile, RawWorkspace};
