//! Style collection into the inline and file buckets.
//!
//! A block's style descriptor looks like:
//!
//! ```json
//! { "paths": { "root": "blocks/menu/menu.sass", "custom": "custom/shop/menu.sass" },
//!   "inline": true }
//! ```
//!
//! Its references are appended in cascade order (root, rootMod, custom,
//! customMod) so later entries override earlier ones once compiled.
//!
//! Descriptors are read leniently: a value that is not an object, a
//! `paths` that is not an object, or a non-string variant contributes
//! nothing. `inline` is read by truthiness.

use super::node::is_truthy;
use rustc_hash::FxHashSet;
use serde_json::{Map, Value};
use std::fmt;

/// Style descriptor of one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDescriptor {
    pub paths: Option<StylePaths>,
    /// Route to the inline bucket instead of the file bucket.
    pub inline: bool,
}

impl StyleDescriptor {
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self::default();
        };
        Self {
            paths: fields.get("paths").and_then(Value::as_object).map(StylePaths::from_map),
            inline: fields.get("inline").is_some_and(is_truthy),
        }
    }
}

/// Cascade variants of a block's style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylePaths {
    pub root: Option<String>,
    pub root_mod: Option<String>,
    pub custom: Option<String>,
    pub custom_mod: Option<String>,
}

impl StylePaths {
    fn from_map(paths: &Map<String, Value>) -> Self {
        let variant = |key: &str| paths.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            root: variant("root"),
            root_mod: variant("rootMod"),
            custom: variant("custom"),
            custom_mod: variant("customMod"),
        }
    }

    /// Present, non-empty references in cascade order.
    pub fn cascade(&self) -> impl Iterator<Item = &str> {
        [&self.root, &self.root_mod, &self.custom, &self.custom_mod]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .filter(|path| !path.is_empty())
    }
}

/// Destination of collected references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Compiled and embedded in the page payload.
    Inline,
    /// Compiled into a standalone stylesheet.
    ToFile,
}

impl Bucket {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::ToFile => "tofile",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered style references per destination. Duplicates are allowed until
/// [`StyleBuckets::normalize`] runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleBuckets {
    pub inline: Vec<String>,
    pub tofile: Vec<String>,
}

impl StyleBuckets {
    pub fn get(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::Inline => &self.inline,
            Bucket::ToFile => &self.tofile,
        }
    }

    fn get_mut(&mut self, bucket: Bucket) -> &mut Vec<String> {
        match bucket {
            Bucket::Inline => &mut self.inline,
            Bucket::ToFile => &mut self.tofile,
        }
    }

    /// Deduplicate both buckets (first occurrence wins) and drop from the
    /// file bucket everything already inline.
    pub fn normalize(&mut self) {
        let mut inline_seen = FxHashSet::default();
        self.inline.retain(|style| inline_seen.insert(style.clone()));

        let mut tofile_seen = FxHashSet::default();
        self.tofile
            .retain(|style| !inline_seen.contains(style) && tofile_seen.insert(style.clone()));
    }
}

/// Appends descriptor references to a fresh pair of buckets.
#[derive(Debug)]
pub struct StyleCollector<'a> {
    suffixes: &'a [String],
    buckets: StyleBuckets,
}

impl<'a> StyleCollector<'a> {
    pub fn new(suffixes: &'a [String]) -> Self {
        Self {
            suffixes,
            buckets: StyleBuckets::default(),
        }
    }

    /// Read a raw style field and collect it.
    pub fn collect_value(&mut self, value: &Value) {
        self.collect(&StyleDescriptor::from_value(value));
    }

    pub fn collect(&mut self, descriptor: &StyleDescriptor) {
        let Some(paths) = &descriptor.paths else {
            return;
        };

        let bucket = if descriptor.inline {
            Bucket::Inline
        } else {
            Bucket::ToFile
        };

        let suffixes = self.suffixes;
        let target = self.buckets.get_mut(bucket);
        target.extend(paths.cascade().map(|path| strip_suffix(path, suffixes).to_owned()));
    }

    /// Normalize and hand over the buckets.
    pub fn finish(mut self) -> StyleBuckets {
        self.buckets.normalize();
        self.buckets
    }
}

fn strip_suffix<'p>(path: &'p str, suffixes: &[String]) -> &'p str {
    suffixes
        .iter()
        .find_map(|suffix| path.strip_suffix(suffix.as_str()))
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn suffixes() -> Vec<String> {
        vec![".sass".into(), ".scss".into()]
    }

    fn collect(values: &[Value]) -> StyleBuckets {
        let suffixes = suffixes();
        let mut collector = StyleCollector::new(&suffixes);
        for value in values {
            collector.collect_value(value);
        }
        collector.finish()
    }

    #[test]
    fn test_cascade_order_and_suffix_strip() {
        let buckets = collect(&[json!({"paths": {
            "customMod": "custom/shop/menu_wide.sass",
            "custom": "custom/shop/menu.sass",
            "rootMod": "blocks/menu/menu_wide.scss",
            "root": "blocks/menu/menu.sass"
        }})]);
        assert_eq!(
            buckets.tofile,
            [
                "blocks/menu/menu",
                "blocks/menu/menu_wide",
                "custom/shop/menu",
                "custom/shop/menu_wide"
            ]
        );
        assert!(buckets.inline.is_empty());
    }

    #[test]
    fn test_cascade_subset_keeps_relative_order() {
        let buckets = collect(&[json!({"paths": {"customMod": "d.sass", "root": "a.sass"}, "inline": true})]);
        assert_eq!(buckets.inline, ["a", "d"]);
    }

    #[test]
    fn test_only_trailing_suffix_stripped() {
        let buckets = collect(&[json!({"paths": {"root": "blocks/x.sass.d/x.sass", "custom": "plain"}})]);
        assert_eq!(buckets.tofile, ["blocks/x.sass.d/x", "plain"]);
    }

    #[test]
    fn test_absent_or_empty_paths_collect_nothing() {
        let buckets = collect(&[
            json!({"inline": true}),
            json!({"paths": {}}),
            json!({"paths": null}),
            json!({"paths": {"root": ""}}),
        ]);
        assert_eq!(buckets, StyleBuckets::default());
    }

    #[test]
    fn test_loose_descriptors_collect_nothing() {
        let buckets = collect(&[
            json!("blocks/menu/menu.sass"),
            json!(1),
            json!(["a.sass"]),
            json!({"paths": "menu.sass"}),
            json!({"paths": ["menu.sass"]}),
            json!({"paths": {"root": 1, "custom": false}}),
        ]);
        assert_eq!(buckets, StyleBuckets::default());
    }

    #[test]
    fn test_inline_read_by_truthiness() {
        let buckets = collect(&[
            json!({"paths": {"root": "a.sass"}, "inline": 1}),
            json!({"paths": {"root": "b.sass"}, "inline": "yes"}),
            json!({"paths": {"root": "c.sass"}, "inline": 0}),
            json!({"paths": {"root": "d.sass"}, "inline": ""}),
            json!({"paths": {"root": "e.sass"}, "inline": null}),
        ]);
        assert_eq!(buckets.inline, ["a", "b"]);
        assert_eq!(buckets.tofile, ["c", "d", "e"]);
    }

    #[test]
    fn test_non_string_variant_skipped() {
        let descriptor = StyleDescriptor::from_value(&json!({"paths": {"root": "a.sass", "rootMod": 2}}));
        let paths = descriptor.paths.unwrap();
        assert_eq!(paths.cascade().collect::<Vec<_>>(), ["a.sass"]);
        assert!(!descriptor.inline);
    }

    #[test]
    fn test_normalize_inline_wins() {
        let mut buckets = StyleBuckets {
            inline: vec!["x".into(), "b".into(), "x".into()],
            tofile: vec!["a".into(), "x".into(), "c".into(), "a".into(), "b".into()],
        };
        buckets.normalize();
        assert_eq!(buckets.inline, ["x", "b"]);
        assert_eq!(buckets.tofile, ["a", "c"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut once = StyleBuckets {
            inline: vec!["b".into(), "b".into()],
            tofile: vec!["a".into(), "b".into(), "a".into()],
        };
        once.normalize();
        let mut twice = once.clone();
        twice.normalize();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fresh_collectors_do_not_accumulate() {
        let tree = [json!({"paths": {"root": "a.sass"}}), json!({"paths": {"root": "b.sass"}, "inline": true})];
        assert_eq!(collect(&tree), collect(&tree));
    }

    #[test]
    fn test_bucket_names() {
        assert_eq!(Bucket::Inline.to_string(), "inline");
        assert_eq!(Bucket::ToFile.name(), "tofile");
    }
}
