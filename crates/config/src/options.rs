//! Options controlling how descriptor sources are read

use buildplan_core::constants::{BUILDPLAN_MAX_DEPTH_VAR, DEFAULT_MAX_DEPTH};
use buildplan_core::{Error, Result};

/// Settings for descriptor discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Maximum directory depth searched for module files
    pub max_depth: usize,
    /// Whether discovery follows symbolic links
    pub follow_links: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            follow_links: false,
        }
    }
}

impl LoadOptions {
    /// Defaults overridden by `BUILDPLAN_MAX_DEPTH` when set
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut options = Self::default();
        if let Some(raw) = lookup(BUILDPLAN_MAX_DEPTH_VAR) {
            options.max_depth = raw.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{BUILDPLAN_MAX_DEPTH_VAR} must be a non-negative integer, got '{raw}'"
                ))
            })?;
        }
        Ok(options)
    }

    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let options = LoadOptions::from_lookup(|_| None).unwrap();
        assert_eq!(options, LoadOptions::default());
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[rstest]
    #[case("4", 4)]
    #[case(" 0 ", 0)]
    #[case("128", 128)]
    fn test_env_override(#[case] raw: &str, #[case] expected: usize) {
        let options = LoadOptions::from_lookup(|key| {
            (key == BUILDPLAN_MAX_DEPTH_VAR).then(|| raw.to_string())
        })
        .unwrap();
        assert_eq!(options.max_depth, expected);
    }

    #[rstest]
    #[case("deep")]
    #[case("-1")]
    #[case("")]
    fn test_invalid_env_value(#[case] raw: &str) {
        let err = LoadOptions::from_lookup(|_| Some(raw.to_string())).unwrap_err();
        assert!(err.to_string().contains(BUILDPLAN_MAX_DEPTH_VAR));
    }

    #[test]
    fn test_builder_overrides() {
        let options = LoadOptions::default().max_depth(2).follow_links(true);
        assert_eq!(options.max_depth, 2);
        assert!(options.follow_links);
    }
}
