//! Toolchain version floors

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Minimum platform version a module needs, e.g. `17`, `21` or `1.8`
///
/// Components compare numerically; missing trailing components count as zero,
/// so `21` and `21.0` are equal. The declared spelling is kept for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToolchainVersion {
    raw: String,
    components: Vec<u64>,
}

impl ToolchainVersion {
    pub fn parse(value: &str) -> Result<Self> {
        let raw = value.trim();
        if raw.is_empty() {
            return Err(Error::configuration("toolchain version cannot be empty"));
        }

        let components = raw
            .split('.')
            .map(|part| {
                part.parse::<u64>().map_err(|_| {
                    Error::configuration(format!(
                        "toolchain version '{raw}' must be dot-separated numbers"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            raw: raw.to_string(),
            components,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Leading component, the major platform release
    pub fn major(&self) -> u64 {
        self.components[0]
    }

    fn significant(&self) -> &[u64] {
        let end = self
            .components
            .iter()
            .rposition(|c| *c != 0)
            .map_or(0, |i| i + 1);
        &self.components[..end]
    }
}

impl PartialEq for ToolchainVersion {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for ToolchainVersion {}

impl Hash for ToolchainVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl Ord for ToolchainVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.significant().cmp(other.significant())
    }
}

impl PartialOrd for ToolchainVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ToolchainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ToolchainVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ToolchainVersion {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<ToolchainVersion> for String {
    fn from(version: ToolchainVersion) -> Self {
        version.raw
    }
}
