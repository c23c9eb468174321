//! Import manifest assembly.
//!
//! A manifest is indented-syntax Sass made only of an environment variable
//! and `@import` lines:
//!
//! ```text
//! $env: dev
//! @import /site/src/styles/common          common group
//! @import /site/src/styles/global/normalize  other core groups (inline only)
//! @import blocks/menu/menu                 collected block styles
//! @import /site/src/styles/global/print    vendors group (file only)
//! ```

use super::collect::{Bucket, StyleBuckets};
use crate::config::{BLOCKS_GROUP, BuildEnv, COMMON_GROUP, CoreStyles, VENDORS_GROUP};
use crate::utils::path::{normalize_separators, to_slash};
use rustc_hash::FxHashSet;
use std::{fmt::Write, path::Path};

/// Inputs of manifest assembly besides the buckets and core styles.
#[derive(Debug, Clone)]
pub struct ManifestContext<'a> {
    env: &'a BuildEnv,
    /// `<root>/src/styles/`, base of core style references.
    styles_root: String,
    /// `<root>/src/`, base of the `blocks` core group.
    src_root: String,
}

impl<'a> ManifestContext<'a> {
    pub fn new(env: &'a BuildEnv, project_root: &Path) -> Self {
        let root = to_slash(project_root);
        let root = if root.is_empty() || root.ends_with('/') {
            root
        } else {
            format!("{root}/")
        };
        Self {
            env,
            styles_root: format!("{root}src/styles/"),
            src_root: format!("{root}src/"),
        }
    }
}

/// The two manifests of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifests {
    pub inline: String,
    pub tofile: String,
}

impl Manifests {
    pub fn assemble(buckets: &StyleBuckets, core: &CoreStyles, ctx: &ManifestContext<'_>) -> Self {
        Self {
            inline: assemble(Bucket::Inline, buckets, core, ctx),
            tofile: assemble(Bucket::ToFile, buckets, core, ctx),
        }
    }
}

/// Build the manifest of one bucket.
///
/// Order: env, `common`, other core groups except `vendors` (inline only),
/// the bucket's references, `vendors` (file only).
pub fn assemble(
    bucket: Bucket,
    buckets: &StyleBuckets,
    core: &CoreStyles,
    ctx: &ManifestContext<'_>,
) -> String {
    let mut content = format!("$env: {}\n", ctx.env);
    let mut import = |base: &str, path: &str| {
        writeln!(content, "@import {base}{path}").ok();
    };

    for path in core.group(COMMON_GROUP) {
        import(&ctx.styles_root, path);
    }

    if bucket == Bucket::Inline {
        let groups = core
            .groups()
            .filter(|(name, _)| *name != COMMON_GROUP && *name != VENDORS_GROUP);
        for (name, paths) in groups {
            let base = if name == BLOCKS_GROUP {
                &ctx.src_root
            } else {
                &ctx.styles_root
            };
            for path in paths {
                import(base, path);
            }
        }
    }

    let mut seen = FxHashSet::default();
    for path in buckets.get(bucket) {
        if seen.insert(path.as_str()) {
            import("", path);
        }
    }

    if bucket == Bucket::ToFile {
        for path in core.group(VENDORS_GROUP) {
            import(&ctx.styles_root, path);
        }
    }

    normalize_separators(&content)
}
