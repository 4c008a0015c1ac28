/// Constants used throughout the buildplan codebase
// Descriptor files
pub const MODULE_FILE_STEM: &str = "module";
pub const MODULE_FILE_SUFFIX: &str = ".module";
pub const CATALOG_FILE_STEM: &str = "catalog";
pub const DESCRIPTOR_EXTENSIONS: &[&str] = &["json", "toml"];

// Directory discovery
pub const DEFAULT_MAX_DEPTH: usize = 32;

// Environment variable names
pub const BUILDPLAN_LOG_VAR: &str = "BUILDPLAN_LOG";
pub const BUILDPLAN_MAX_DEPTH_VAR: &str = "BUILDPLAN_MAX_DEPTH";

// Defaults applied to records that leave fields out
pub const DEFAULT_SCOPE: &str = "implementation";
pub const DEFAULT_SUITE_KIND: &str = "unit";
