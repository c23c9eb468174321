//! Multi-page build orchestration.
//!
//! ```text
//! build_pages(paths)
//!     │
//!     ├── collect_pages() ──► *.json under every path, minus crosspages/
//!     │                       and the temp/, dest/, prod/ output trees
//!     │
//!     └── par_iter ──► pack_page() per file
//!                         └── failure: logged, other pages continue
//! ```

use crate::{
    compiler::StyleCompiler,
    config::PackConfig,
    log,
    pack::pack_page,
};
use anyhow::{Result, bail};
use rayon::prelude::*;
use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};
use walkdir::{DirEntry, WalkDir};

/// Directory holding shared data; never packed as a page.
const CROSS_DATA_DIR: &str = "crosspages";
/// Generated trees under a project root; their JSON is output, not input.
const OUTPUT_DIRS: &[&str] = &["temp", "dest", "prod"];
const PAGE_EXT: &str = "json";

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name == CROSS_DATA_DIR || OUTPUT_DIRS.contains(&name))
}

/// Page files named by `paths`: files as given, directories walked for
/// `*.json` outside shared data and output trees. Sorted and deduplicated.
pub fn collect_pages(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut pages: Vec<PathBuf> = paths
        .iter()
        .flat_map(|path| {
            if path.is_dir() {
                WalkDir::new(path)
                    .into_iter()
                    .filter_entry(|e| !is_skipped_dir(e))
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .map(|e| e.into_path())
                    .filter(|p| p.extension().is_some_and(|ext| ext == PAGE_EXT))
                    .collect()
            } else {
                vec![path.clone()]
            }
        })
        .collect();

    pages.sort();
    pages.dedup();
    pages
}

/// Pack every page in parallel. Each page is independent; the build fails
/// after all pages ran if any of them failed.
pub fn build_pages(paths: &[PathBuf], config: &PackConfig, compiler: &dyn StyleCompiler) -> Result<usize> {
    let pages = collect_pages(paths);
    if pages.is_empty() {
        log!("warn"; "no page files found");
        return Ok(0);
    }

    log!("build"; "packing {} pages...", pages.len());
    let failed = AtomicUsize::new(0);

    pages.par_iter().for_each(|page| {
        if let Err(e) = pack_one(page, config, compiler) {
            log!("error"; "{}: {:#}", page.display(), e);
            failed.fetch_add(1, Ordering::Relaxed);
        }
    });

    let failed = failed.into_inner();
    if failed > 0 {
        bail!("{failed} of {} pages failed", pages.len());
    }

    log!("build"; "done, {} pages packed", pages.len());
    Ok(pages.len())
}

fn pack_one(page: &Path, config: &PackConfig, compiler: &dyn StyleCompiler) -> Result<()> {
    let page = absolute(page)?;
    let output = pack_page(&page, config, compiler)?;
    log!(
        "pack";
        "{}: {} bytes inline, {} -> {}",
        page.file_name().unwrap_or_default().to_string_lossy(),
        output.inline_css.len(),
        output.manifest_path.display(),
        output.stylesheet_path.display()
    );
    log!("pack"; "payload {}", output.payload_path.display());
    Ok(())
}

/// Absolute form of `path`, so project root inference sees every segment.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}
