//! Style pack resolution for one page.
//!
//! # Pipeline
//!
//! ```text
//! pack_page(file)
//!     │
//!     ├── prepare()                       no writes
//!     │     ├── project root ◄── first `src` segment of file
//!     │     ├── shared data  ◄── locate::locate_cross_data
//!     │     ├── merged data  ◄── data::merge(shared, page) + env
//!     │     ├── buckets      ◄── walk::Walker → collect::StyleCollector
//!     │     └── manifests    ◄── manifest::Manifests
//!     │
//!     ├── compile inline manifest ──► payload[style_data_key]
//!     ├── write file manifest ──► compile to <dest|prod>/public/styles
//!     └── write payload
//!           └── failure: manifest, stylesheet and payload removed
//! ```

pub mod collect;
pub mod data;
pub mod error;
pub mod locate;
pub mod manifest;
pub mod node;
pub mod output;
pub mod walk;

use crate::compiler::StyleCompiler;
use crate::config::PackConfig;
use crate::log;
use crate::utils::path::project_root;
use anyhow::{Context, Result};
use collect::{StyleBuckets, StyleCollector};
use error::PackError;
use manifest::{ManifestContext, Manifests};
use output::{OutputLayout, write_file};
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walk::Walker;

/// Source directory under the project root; relative style references
/// resolve against it.
const SRC_DIR: &str = "src";

/// Everything resolved for a page before compilation.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub project_root: PathBuf,
    pub data: Value,
    pub buckets: StyleBuckets,
    pub manifests: Manifests,
}

/// Result of packing one page.
#[derive(Debug, Clone)]
pub struct PackOutput {
    pub inline_css: String,
    pub manifest_path: PathBuf,
    pub stylesheet_path: PathBuf,
    pub payload_path: PathBuf,
}

/// Resolve data, buckets and manifests of `file` without touching the disk
/// beyond reading.
pub fn prepare(file: &Path, config: &PackConfig) -> Result<Prepared, PackError> {
    let root = project_root(file).ok_or_else(|| PackError::NoProjectRoot(file.to_path_buf()))?;
    let page_key = &config.data.page_key;

    let dir = file.parent().unwrap_or(Path::new(""));
    let shared = data::load(&locate::locate_cross_data(dir)?, page_key)?;
    let page = data::load(file, page_key)?;
    let data = data::merge(shared, page, &config.env);

    let mut collector = StyleCollector::new(&config.styles.suffixes);
    Walker::new(&config.styles.path_key, &mut collector).walk(&data)?;
    let buckets = collector.finish();

    let ctx = ManifestContext::new(&config.env, &root);
    let manifests = Manifests::assemble(&buckets, &config.styles.core, &ctx);

    Ok(Prepared {
        project_root: root,
        data,
        buckets,
        manifests,
    })
}

/// Pack one page: compile its inline styles into the payload, write and
/// compile its file manifest, write the payload.
pub fn pack_page(file: &Path, config: &PackConfig, compiler: &dyn StyleCompiler) -> Result<PackOutput> {
    let Prepared {
        project_root,
        data,
        manifests,
        ..
    } = prepare(file, config)?;
    let load_path = project_root.join(SRC_DIR);

    let inline_css = compiler
        .compile_source(&manifests.inline, &load_path)
        .context("Failed to compile inline styles")?;

    let mut payload = data;
    if let Value::Object(map) = &mut payload {
        map.insert(config.data.style_data_key.clone(), Value::String(inline_css.clone()));
    }
    let serialized = serde_json::to_string(&payload)?;

    let layout = OutputLayout::new(&project_root, file, &config.env)?;

    let manifest_path = layout.temp_manifest();
    let stylesheet_path = layout.stylesheet();
    let payload_path = layout.payload();

    write_file(&manifest_path, &manifests.tofile)?;
    if let Err(err) = compile_and_write(&layout, compiler, &load_path, serialized) {
        for path in [&manifest_path, &stylesheet_path, &payload_path] {
            discard(path);
        }
        return Err(err);
    }

    Ok(PackOutput {
        inline_css,
        manifest_path,
        stylesheet_path,
        payload_path,
    })
}

/// Compile the written file manifest, then write the payload.
fn compile_and_write(
    layout: &OutputLayout,
    compiler: &dyn StyleCompiler,
    load_path: &Path,
    payload: String,
) -> Result<()> {
    let styles_dir = layout.styles_dir();
    fs::create_dir_all(&styles_dir).map_err(|err| PackError::Io(styles_dir.clone(), err))?;
    compiler.compile_file(&layout.temp_manifest(), &layout.stylesheet(), load_path)?;
    write_file(&layout.payload(), payload)?;
    Ok(())
}

/// Remove an output of a failed page; absent files are fine.
fn discard(path: &Path) {
    if let Err(err) = fs::remove_file(path)
        && err.kind() != std::io::ErrorKind::NotFound
    {
        log!("warn"; "cannot remove `{}`: {}", path.display(), err);
    }
}
