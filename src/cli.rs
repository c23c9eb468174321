//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Style bundle packer for block-based page templates
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Directory holding the config file (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: stylepack.toml)
    #[arg(short = 'C', long, default_value = "stylepack.toml")]
    pub config: PathBuf,

    /// Build environment; `dev` writes to `dest/`, anything else to `prod/`
    #[arg(short, long, default_value = "dev")]
    pub env: String,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Pack styles for page data files and compile them
    Build {
        /// Page data files, or directories searched for `*.json` page files
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Print the inline and file manifests of one page without compiling
    Inspect {
        /// Page data file
        file: PathBuf,
    },
}
