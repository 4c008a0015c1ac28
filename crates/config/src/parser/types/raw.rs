//! Raw types for direct descriptor deserialization
//!
//! Every field is optional or defaulted so that a record with missing pieces
//! still deserializes; missing required fields are reported afterwards as
//! malformed-record violations rather than as parse failures.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One module record as written in a descriptor file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDescriptor {
    #[serde(default, deserialize_with = "scalar::deserialize")]
    pub name: Option<String>,
    #[serde(default)]
    pub plugins: Vec<String>,
    #[serde(default)]
    pub repositories: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<RawDependency>,
    #[serde(default, deserialize_with = "scalar::deserialize")]
    pub toolchain_floor: Option<String>,
    #[serde(default)]
    pub test_suites: Vec<RawTestSuite>,
    #[serde(default)]
    pub reports: Vec<RawReport>,
}

impl RawDescriptor {
    /// A record carrying only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn depends_on(mut self, target: impl Into<String>, scope: impl Into<String>) -> Self {
        self.dependencies.push(RawDependency {
            target: Some(target.into()),
            scope: Some(scope.into()),
        });
        self
    }

    #[must_use]
    pub fn toolchain(mut self, floor: impl Into<String>) -> Self {
        self.toolchain_floor = Some(floor.into());
        self
    }

    #[must_use]
    pub fn suite(mut self, name: impl Into<String>, kind: impl Into<String>) -> Self {
        self.test_suites.push(RawTestSuite {
            name: Some(name.into()),
            kind: Some(kind.into()),
            engine: None,
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDependency {
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTestSuite {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReport {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub test_suite: Option<String>,
}

/// Scalars read as text, so `toolchainFloor = 21` and `"21"` mean the same
mod scalar {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarVisitor)
    }

    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(ScalarVisitor)
        }
    }
}

/// Workspace document: a catalog plus module records
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawWorkspace {
    #[serde(default)]
    pub catalog: IndexMap<String, RawCatalogEntry>,
    #[serde(default)]
    pub modules: Vec<RawDescriptor>,
}

/// Standalone catalog file, either a flat alias map or a `[libraries]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawCatalogFile {
    #[serde(default)]
    pub libraries: Option<IndexMap<String, RawCatalogEntry>>,
    #[serde(flatten)]
    pub entries: IndexMap<String, serde_json::Value>,
}

/// A catalog entry in any of the accepted spellings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawCatalogEntry {
    /// `"group:artifact:version"`
    Notation(String),
    /// `{ module = "group:artifact", version = "1.0" }`
    Module {
        module: String,
        #[serde(default)]
        version: Option<String>,
    },
    /// `{ group = "g", name = "a", version = "1.0" }`
    Parts {
        group: String,
        name: String,
        #[serde(default)]
        version: Option<String>,
    },
}

impl RawCatalogEntry {
    /// The coordinate notation this entry spells
    pub fn notation(&self) -> String {
        match self {
            RawCatalogEntry::Notation(value) => value.clone(),
            RawCatalogEntry::Module { module, version } => match version {
                Some(v) => format!("{module}:{v}"),
                None => module.clone(),
            },
            RawCatalogEntry::Parts {
                group,
                name,
                version,
            } => match version {
                Some(v) => format!("{group}:{name}:{v}"),
                None => format!("{group}:{name}"),
            },
        }
    }
}
