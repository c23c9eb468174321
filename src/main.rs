//! Stylepack - style bundle packer for block-based page templates.

mod build;
mod cli;
mod compiler;
mod config;
mod pack;
mod utils;

use anyhow::{Context, Result};
use build::{absolute, build_pages};
use clap::Parser;
use cli::{Cli, Commands};
use compiler::SassCommand;
use config::PackConfig;
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static PackConfig = Box::leak(Box::new(PackConfig::load(cli)?));

    match &cli.command {
        Commands::Build { paths } => {
            let compiler = SassCommand::new(config);
            build_pages(paths, config, &compiler).map(|_| ())
        }
        Commands::Inspect { file } => inspect(file, config),
    }
}

/// Print both manifests of one page without compiling or writing.
fn inspect(file: &Path, config: &PackConfig) -> Result<()> {
    let file = absolute(file)?;
    let prepared = pack::prepare(&file, config)
        .with_context(|| format!("Failed to resolve styles of `{}`", file.display()))?;

    log!(
        "pack";
        "{}: {} inline, {} to file",
        file.display(),
        prepared.buckets.inline.len(),
        prepared.buckets.tofile.len()
    );
    println!("// inline\n{}", prepared.manifests.inline);
    println!("// tofile\n{}", prepared.manifests.tofile);
    Ok(())
}
