//! Node shapes of a page data tree.
//!
//! Every key/value pair is classified once into a [`Node`] before the walker
//! acts on it:
//!
//! ```text
//! "contents": [ { "stylesPath": {..}, "param": { "sortBlocks": {..} } } ]  → Composition
//! "stylesPath": { "paths": {..}, "inline": true }                         → Style
//! "stylesPath": null | false | "" | 0                                     → Leaf
//! "tools": {..}                                                            → Leaf
//! any other object or array                                                → Container
//! anything else                                                            → Leaf
//! ```

use super::error::PackError;
use serde_json::{Map, Value};

/// Key of the field holding a composition payload.
pub const CONTENTS_KEY: &str = "contents";
/// Reserved tooling field, never descended into.
pub const TOOLS_KEY: &str = "tools";
/// Ordering used when the active modifier has none of its own.
pub const DEFAULT_ORDER: &str = "default";

const PARAM_KEY: &str = "param";
const BLOCKS_KEY: &str = "blocks";
const SORT_BLOCKS_KEY: &str = "sortBlocks";
const MOD_KEY: &str = "mod";
const OPTIONS_KEY: &str = "opt";

/// Classified key/value pair.
#[derive(Debug)]
pub enum Node<'a> {
    Composition(Composition<'a>),
    Style(&'a Value),
    Container(&'a Value),
    Leaf,
}

impl<'a> Node<'a> {
    pub fn classify(key: &str, value: &'a Value, style_key: &str) -> Self {
        if key == CONTENTS_KEY
            && let Some(composition) = Contents::from_value(value).and_then(Composition::from_contents)
        {
            return Self::Composition(composition);
        }

        if key == style_key {
            return if is_truthy(value) {
                Self::Style(value)
            } else {
                Self::Leaf
            };
        }

        match value {
            Value::Object(_) | Value::Array(_) if key != TOOLS_KEY => Self::Container(value),
            _ => Self::Leaf,
        }
    }
}

/// The single payload object of a `contents` field.
///
/// `contents` is stored as a one-element array; this wrapper holds the
/// element itself so nothing downstream indexes into the array.
#[derive(Debug, Clone, Copy)]
pub struct Contents<'a> {
    payload: &'a Map<String, Value>,
}

impl<'a> Contents<'a> {
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value.as_array()?.as_slice() {
            [Value::Object(payload)] => Some(Self { payload }),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.payload.get(key)
    }
}

/// A block-list container: named blocks plus modifier-selected orderings.
#[derive(Debug, Clone)]
pub struct Composition<'a> {
    contents: Contents<'a>,
    blocks: Option<&'a Map<String, Value>>,
    sort_blocks: &'a Map<String, Value>,
    /// `param.mod` as a `sortBlocks` key; numbers and booleans are
    /// looked up by their text.
    modifier: Option<String>,
}

impl<'a> Composition<'a> {
    /// A payload is a composition only when `param.sortBlocks` is a
    /// non-empty table.
    pub fn from_contents(contents: Contents<'a>) -> Option<Self> {
        let param = contents.get(PARAM_KEY)?.as_object()?;
        let sort_blocks = param.get(SORT_BLOCKS_KEY)?.as_object()?;
        if sort_blocks.is_empty() {
            return None;
        }

        Some(Self {
            contents,
            blocks: param.get(BLOCKS_KEY).and_then(Value::as_object),
            sort_blocks,
            modifier: param.get(MOD_KEY).and_then(modifier_key),
        })
    }

    /// The composition owner's own value under `key` (its style descriptor).
    pub fn own(&self, key: &str) -> Option<&'a Value> {
        self.contents.get(key)
    }

    /// Block names in render order.
    ///
    /// Uses `sortBlocks[mod]` when it is truthy, `sortBlocks.default`
    /// otherwise. A missing `default` at that point is an error; `at` names
    /// the node in the error.
    pub fn order(&self, at: impl FnOnce() -> String) -> Result<Vec<&'a str>, PackError> {
        let selected = self
            .modifier
            .as_deref()
            .and_then(|name| Some((name, self.sort_blocks.get(name)?)))
            .filter(|(_, order)| is_truthy(order))
            .or_else(|| {
                self.sort_blocks
                    .get(DEFAULT_ORDER)
                    .filter(|order| !order.is_null())
                    .map(|order| (DEFAULT_ORDER, order))
            });

        let Some((name, order)) = selected else {
            return Err(PackError::MissingDefaultOrder {
                at: at(),
                modifier: self.modifier.as_deref().unwrap_or(DEFAULT_ORDER).to_owned(),
            });
        };

        match order.as_str() {
            Some(order) => Ok(order.split_whitespace().collect()),
            None => Err(PackError::InvalidOrder {
                at: at(),
                modifier: name.to_owned(),
            }),
        }
    }

    /// Nested options (`blocks[name].opt`) of a block, if it is declared.
    pub fn block_options(&self, name: &str) -> Option<&'a Value> {
        self.blocks?.get(name)?.get(OPTIONS_KEY)
    }
}

/// Loose truthiness: `null`, `false`, `""` and zero are unset, everything
/// else (including empty objects and arrays) is set.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn modifier_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
