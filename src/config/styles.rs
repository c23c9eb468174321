//! `[styles]` section configuration.
//!
//! Holds the style-descriptor field name and the core style map: groups of
//! style references every page includes regardless of its blocks.

use super::defaults;
use crate::utils::merge::deep_merge;
use educe::Educe;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value, json};

/// Group emitted first in every manifest.
pub const COMMON_GROUP: &str = "common";
/// Group emitted last, and only in the file manifest.
pub const VENDORS_GROUP: &str = "vendors";
/// Group whose entries resolve against the source root instead of the styles root.
pub const BLOCKS_GROUP: &str = "blocks";

/// `[styles]` section in stylepack.toml.
///
/// # Example
/// ```toml
/// [styles]
/// path_key = "stylesPath"
///
/// [styles.core.layout]
/// aside = ""                       # drop a default entry
/// wide = "layouts/l-wide"          # add one
///
/// [styles.core.vendors]
/// slider = "vendors/vendor.slider.custom"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct StylesConfig {
    /// Field name carrying a block's style descriptor.
    #[serde(default = "defaults::styles::path_key")]
    #[educe(Default = defaults::styles::path_key())]
    pub path_key: String,

    /// Style-file suffixes stripped from collected references.
    #[serde(default = "defaults::styles::suffixes")]
    #[educe(Default = defaults::styles::suffixes())]
    pub suffixes: Vec<String>,

    /// Core style groups, deep-merged over the built-in defaults.
    #[serde(default)]
    pub core: CoreStyles,
}

/// Ordered, nested map of always-included style references.
///
/// A group is a string (one reference), an array of strings, or a table of
/// named entries which are themselves strings or arrays. Declaration order
/// is emission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CoreStyles(Map<String, Value>);

impl Default for CoreStyles {
    fn default() -> Self {
        let defaults = json!({
            "common": "common",
            "global": {
                "normalize": "global/normalize",
                "instruments": "global/instruments",
                "elements": "global/elements",
                "modify": "global/modify",
            },
            "layout": {
                "page": "layouts/l-page",
                "aside": "layouts/l-aside",
            },
            "vendors": {
                "print": "global/print",
                "colorbox": "vendors/vendor.colorbox.custom",
                "scrollbar": "vendors/vendor.scrollbar.custom",
                "fotorama": "vendors/vendor.fotorama.custom",
            },
        });
        match defaults {
            Value::Object(map) => Self(map),
            _ => Self(Map::new()),
        }
    }
}

impl<'de> Deserialize<'de> for CoreStyles {
    /// User tables extend the defaults rather than replacing them.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let overlay = Map::<String, Value>::deserialize(deserializer)?;
        let mut core = Self::default();
        core.extend(Value::Object(overlay));
        Ok(core)
    }
}

impl CoreStyles {
    /// Build a core map from an explicit table, without the defaults.
    #[cfg(test)]
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Deep-merge `overlay` into this map (tables recurse, arrays concatenate).
    pub fn extend(&mut self, overlay: Value) {
        let mut base = Value::Object(std::mem::take(&mut self.0));
        deep_merge(&mut base, overlay);
        self.0 = match base {
            Value::Object(map) => map,
            _ => Map::new(),
        };
    }

    /// Whether a group with this name is declared.
    pub fn contains(&self, group: &str) -> bool {
        self.0.contains_key(group)
    }

    /// Leaf references of one group, in declaration order.
    pub fn group(&self, group: &str) -> Vec<&str> {
        self.0.get(group).map(leaves).unwrap_or_default()
    }

    /// All groups in declaration order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.0.iter().map(|(name, value)| (name.as_str(), leaves(value)))
    }
}

/// Flatten a group value into its non-empty string leaves.
fn leaves(value: &Value) -> Vec<&str> {
    match value {
        Value::String(s) if !s.is_empty() => vec![s.as_str()],
        Value::Array(items) => items.iter().flat_map(leaves).collect(),
        Value::Object(entries) => entries.values().flat_map(leaves).collect(),
        _ => Vec::new(),
    }
}
