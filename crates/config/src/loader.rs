//! Descriptor loader for buildplan
//!
//! Turns descriptor records into a [`ModuleGraph`]. Records can be supplied
//! directly or read from files and directories; either way the full record
//! set is checked in one pass and every problem is reported together.

use crate::options::LoadOptions;
use crate::parser::{self, build_modules, duplicate_names, DescriptorSet, RawDescriptor};
use buildplan_core::{Error, ModuleGraph, Result};
use buildplan_utils::paths::discover_descriptors;
use std::path::{Path, PathBuf};

/// Loader that gathers descriptor sources and builds the module graph
#[derive(Debug, Clone, Default)]
pub struct DescriptorLoader {
    /// Discovery options
    options: LoadOptions,
    /// Files or directories to read, in order
    sources: Vec<PathBuf>,
}

impl DescriptorLoader {
    /// Create a new loader with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set discovery options
    pub fn options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a descriptor file or directory
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(path.into());
        self
    }

    /// Add several descriptor files or directories
    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.sources.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Read every source into one descriptor set
    pub fn read(&self) -> Result<DescriptorSet> {
        if self.sources.is_empty() {
            return Err(Error::configuration("no descriptor sources given"));
        }

        let mut set = DescriptorSet::default();
        for source in &self.sources {
            let metadata = std::fs::metadata(source)
                .map_err(|e| Error::file_system(source, "stat", e))?;
            if metadata.is_dir() {
                set.merge(self.read_directory(source)?);
            } else {
                set.merge(parser::read_document(source)?);
            }
        }

        Ok(set)
    }

    /// Read every source and build the module graph
    pub fn load(&self) -> Result<ModuleGraph> {
        let _span = tracing::info_span!("load", sources = self.sources.len()).entered();
        load_set(self.read()?)
    }

    fn read_directory(&self, root: &Path) -> Result<DescriptorSet> {
        let discovered =
            discover_descriptors(root, self.options.max_depth, self.options.follow_links)?;

        if discovered.modules.is_empty() {
            tracing::warn!(root = %root.display(), "no module descriptors found");
        }

        let mut set = DescriptorSet::default();
        for catalog in &discovered.catalogs {
            set.catalog.merge(parser::read_catalog(catalog)?);
        }
        for module_file in &discovered.modules {
            set.merge(parser::read_document(module_file)?);
        }
        Ok(set)
    }
}

/// Build a module graph from in-memory records
pub fn load_records(records: Vec<RawDescriptor>) -> Result<ModuleGraph> {
    load_set(DescriptorSet::from_records(records))
}

/// Build a module graph from a descriptor set
///
/// Fails with every malformed-record and duplicate-module violation found;
/// never returns a partial graph.
pub fn load_set(set: DescriptorSet) -> Result<ModuleGraph> {
    if set.records.is_empty() {
        tracing::warn!("descriptor set contains no module records");
    }

    let (modules, mut violations) = build_modules(&set.records);
    violations.extend(duplicate_names(&set.records));
    if !violations.is_empty() {
        tracing::debug!(violations = violations.len(), "descriptor load failed");
        return Err(violations.into());
    }

    let graph = ModuleGraph::from_modules(modules)?;
    tracing::info!(
        modules = graph.len(),
        catalog = set.catalog.len(),
        "loaded module descriptors"
    );
    Ok(graph.with_catalog(set.catalog))
}
