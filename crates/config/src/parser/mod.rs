//! Descriptor document parsing
//!
//! A document is JSON or TOML, picked by file extension, and takes one of
//! three shapes:
//!
//! - a bare array of module records (JSON only);
//! - a workspace object with `catalog` and/or `modules` keys;
//! - a single module record object.

pub mod processing;
pub mod types;


pub use processing::{build_module, build_modules, duplicate_names};
pub use types::*;

use buildplan_core::{Catalog, Coordinate, Error, Result};
use indexmap::IndexMap;
use std::path::Path;
use types::{RawCatalogEntry, RawCatalogFile, RawWorkspace};

/// Supported descriptor encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(DocumentFormat::Json),
            Some("toml") => Ok(DocumentFormat::Toml),
            other => Err(Error::unsupported(
                "descriptor format",
                format!(
                    "'{}' has extension {:?}; expected .json or .toml",
                    path.display(),
                    other.unwrap_or("")
                ),
            )),
        }
    }
}

/// Module records and catalog entries gathered from one or more documents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptorSet {
    pub catalog: Catalog,
    pub records: Vec<RawDescriptor>,
}

impl DescriptorSet {
    pub fn from_records(records: Vec<RawDescriptor>) -> Self {
        Self {
            catalog: Catalog::new(),
            records,
        }
    }

    /// Append another set; catalog entries from `other` win on conflicts
    pub fn merge(&mut self, other: DescriptorSet) {
        self.catalog.merge(other.catalog);
        self.records.extend(other.records);
    }
}

/// Parse a descriptor document
pub fn parse_document(content: &str, format: DocumentFormat, path: &Path) -> Result<DescriptorSet> {
    let workspace = match format {
        DocumentFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(content)
                .map_err(|e| Error::parse_with_source(path, e.to_string(), e))?;
            json_workspace(value, path)?
        }
        DocumentFormat::Toml => {
            let table: toml::Table = toml::from_str(content)
                .map_err(|e| Error::parse_with_source(path, e.message().to_string(), e))?;
            toml_workspace(table, path)?
        }
    };

    Ok(DescriptorSet {
        catalog: build_catalog(workspace.catalog, path)?,
        records: workspace.modules,
    })
}

/// Parse a standalone catalog document
pub fn parse_catalog(content: &str, format: DocumentFormat, path: &Path) -> Result<Catalog> {
    let file: RawCatalogFile = match format {
        DocumentFormat::Json => serde_json::from_str(content)
            .map_err(|e| Error::parse_with_source(path, e.to_string(), e))?,
        DocumentFormat::Toml => toml::from_str(content)
            .map_err(|e| Error::parse_with_source(path, e.message().to_string(), e))?,
    };

    let entries = match file.libraries {
        Some(libraries) => libraries,
        None => file
            .entries
            .into_iter()
            .map(|(alias, value)| {
                serde_json::from_value::<RawCatalogEntry>(value)
                    .map(|entry| (alias.clone(), entry))
                    .map_err(|e| {
                        Error::parse(path, format!("catalog entry '{alias}' is not a coordinate: {e}"))
                    })
            })
            .collect::<Result<IndexMap<_, _>>>()?,
    };

    build_catalog(entries, path)
}

/// Read and parse a descriptor file
pub fn read_document(path: &Path) -> Result<DescriptorSet> {
    let format = DocumentFormat::from_path(path)?;
    let content =
        std::fs::read_to_string(path).map_err(|e| Error::file_system(path, "read", e))?;
    let set = parse_document(&content, format, path)?;
    tracing::debug!(
        path = %path.display(),
        records = set.records.len(),
        catalog = set.catalog.len(),
        "read descriptor document"
    );
    Ok(set)
}

/// Read and parse a catalog file
pub fn read_catalog(path: &Path) -> Result<Catalog> {
    let format = DocumentFormat::from_path(path)?;
    let content =
        std::fs::read_to_string(path).map_err(|e| Error::file_system(path, "read", e))?;
    let catalog = parse_catalog(&content, format, path)?;
    tracing::debug!(path = %path.display(), entries = catalog.len(), "read catalog");
    Ok(catalog)
}

fn json_workspace(value: serde_json::Value, path: &Path) -> Result<RawWorkspace> {
    use serde_json::Value;

    let invalid = |e: serde_json::Error| Error::parse_with_source(path, e.to_string(), e);
    let is_workspace = matches!(
        &value,
        Value::Object(map) if map.contains_key("modules") || map.contains_key("catalog")
    );

    match value {
        Value::Array(_) => Ok(RawWorkspace {
            catalog: IndexMap::new(),
            modules: serde_json::from_value(value).map_err(invalid)?,
        }),
        Value::Object(_) if is_workspace => serde_json::from_value(value).map_err(invalid),
        Value::Object(_) => Ok(RawWorkspace {
            catalog: IndexMap::new(),
            modules: vec![serde_json::from_value(value).map_err(invalid)?],
        }),
        _ => Err(Error::parse(
            path,
            "expected an array of module records or an object",
        )),
    }
}

fn toml_workspace(table: toml::Table, path: &Path) -> Result<RawWorkspace> {
    let is_workspace = table.contains_key("modules") || table.contains_key("catalog");
    let value = toml::Value::Table(table);
    let invalid = |e: toml::de::Error| Error::parse_with_source(path, e.message().to_string(), e);

    if is_workspace {
        value.try_into().map_err(invalid)
    } else {
        Ok(RawWorkspace {
            catalog: IndexMap::new(),
            modules: vec![value.try_into().map_err(invalid)?],
        })
    }
}

fn build_catalog(entries: IndexMap<String, RawCatalogEntry>, path: &Path) -> Result<Catalog> {
    let mut catalog = Catalog::new();
    for (alias, entry) in entries {
        let notation = entry.notation();
        let coordinate = Coordinate::new(&notation).map_err(|_| {
            Error::parse(
                path,
                format!("catalog entry '{alias}' has invalid coordinate '{notation}'"),
            )
        })?;
        catalog.insert(&alias, coordinate);
    }
    Ok(catalog)
}
