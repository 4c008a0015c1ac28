//! Descriptor file discovery

use buildplan_core::constants::{
    CATALOG_FILE_STEM, DESCRIPTOR_EXTENSIONS, MODULE_FILE_STEM, MODULE_FILE_SUFFIX,
};
use buildplan_core::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Descriptor files found under a directory, each list in sorted path order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredFiles {
    /// `catalog.json` / `catalog.toml` at the root
    pub catalogs: Vec<PathBuf>,
    /// `module.*` and `*.module.*` files at any depth up to the limit
    pub modules: Vec<PathBuf>,
}

/// Find descriptor files under `root`
///
/// Hidden directories are skipped. Only the root directory is searched for
/// catalog files.
pub fn discover_descriptors(root: &Path, max_depth: usize, follow_links: bool) -> Result<DiscoveredFiles> {
    let mut found = DiscoveredFiles::default();

    let walker = WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(follow_links)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
            Error::file_system(path, "walk", source)
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if entry.depth() == 1 && is_catalog_file(path) {
            found.catalogs.push(path.to_path_buf());
        } else if is_module_file(path) {
            found.modules.push(path.to_path_buf());
        }
    }

    found.catalogs.sort();
    found.modules.sort();
    tracing::debug!(
        root = %root.display(),
        modules = found.modules.len(),
        catalogs = found.catalogs.len(),
        "discovered descriptor files"
    );
    Ok(found)
}

/// Whether `path` names a module descriptor file
pub fn is_module_file(path: &Path) -> bool {
    let Some(stem) = descriptor_stem(path) else {
        return false;
    };
    stem == MODULE_FILE_STEM || stem.ends_with(MODULE_FILE_SUFFIX)
}

/// Whether `path` names a catalog file
pub fn is_catalog_file(path: &Path) -> bool {
    descriptor_stem(path).is_some_and(|stem| stem == CATALOG_FILE_STEM)
}

fn descriptor_stem(path: &Path) -> Option<&str> {
    let extension = path.extension()?.to_str()?;
    if !DESCRIPTOR_EXTENSIONS.contains(&extension) {
        return None;
    }
    path.file_stem()?.to_str()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
