//! Newtype wrappers for names and coordinates that appear in descriptors

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::ops::Deref;
use std::str::FromStr;

/// A validated module name
///
/// Accepts the project-path spelling `:lib` and stores it as `lib`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleName(String);

impl ModuleName {
    /// Create a new ModuleName with validation
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.strip_prefix(':').unwrap_or(&name);
        if trimmed.is_empty() {
            return Err(Error::configuration("module name cannot be empty"));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
        {
            return Err(Error::configuration(format!(
                "module name '{name}' must contain only alphanumeric characters, underscores, hyphens, and dots"
            )));
        }
        Ok(ModuleName(trimmed.to_string()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for ModuleName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ModuleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for ModuleName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ModuleName {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl From<ModuleName> for String {
    fn from(name: ModuleName) -> Self {
        name.0
    }
}

/// An external artifact coordinate, `group:artifact[:version]`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate(String);

impl Coordinate {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let parts: Vec<&str> = value.split(':').collect();
        if !(2..=3).contains(&parts.len()) || parts.iter().any(|p| p.trim().is_empty()) {
            return Err(Error::configuration(format!(
                "coordinate '{value}' must have the form 'group:artifact[:version]'"
            )));
        }
        Ok(Coordinate(value))
    }

    /// Whether `value` has the shape of a coordinate
    pub fn looks_like(value: &str) -> bool {
        let segments = value.split(':').count();
        !value.starts_with(':') && (2..=3).contains(&segments)
    }

    pub fn group(&self) -> &str {
        self.0.split(':').next().unwrap_or_default()
    }

    pub fn artifact(&self) -> &str {
        self.0.split(':').nth(1).unwrap_or_default()
    }

    pub fn version(&self) -> Option<&str> {
        self.0.split(':').nth(2)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Coordinate {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl From<Coordinate> for String {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.0
    }
}
