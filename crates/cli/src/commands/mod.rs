use buildplan_config::{DescriptorLoader, LoadOptions};
use buildplan_core::{ModuleGraph, Result, ResultExt};
use clap::{Args, Subcommand};
use std::path::PathBuf;

pub mod modules;
pub mod plan;
pub mod validate;

#[derive(Subcommand)]
pub enum Commands {
    /// Load and validate descriptors, listing every violation
    Validate {
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Validate descriptors and emit the build plan
    Plan {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output format (json, tree, dot, mermaid)
        #[arg(long, value_name = "FORMAT", default_value = "json")]
        format: String,

        /// Character set for the tree format (unicode, ascii)
        #[arg(long, value_name = "CHARSET", default_value = "unicode")]
        charset: String,

        /// Write the plan to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List loaded modules
    #[command(visible_alias = "ls")]
    Modules {
        #[command(flatten)]
        sources: SourceArgs,
    },
}

/// Descriptor sources shared by every command
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Descriptor files or directories, merged in the order given
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Maximum directory depth searched for module files
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Follow symbolic links while searching directories
    #[arg(long)]
    pub follow_links: bool,
}

impl SourceArgs {
    /// Flags override `BUILDPLAN_MAX_DEPTH`
    pub fn options(&self) -> Result<LoadOptions> {
        let mut options = LoadOptions::from_env().context("reading load options")?;
        if let Some(depth) = self.max_depth {
            options = options.max_depth(depth);
        }
        if self.follow_links {
            options = options.follow_links(true);
        }
        Ok(options)
    }

    pub fn load(&self) -> Result<ModuleGraph> {
        DescriptorLoader::new()
            .options(self.options()?)
            .paths(self.paths.iter().cloned())
            .load()
    }
}
