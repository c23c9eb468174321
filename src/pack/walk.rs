//! Depth-first traversal of a page data tree.
//!
//! ```text
//! visit(key, value)
//!     │
//!     ├── Composition ──► order blocks ──► collect owner style
//!     │                                      └──► visit each block's `opt`
//!     ├── Style ────────► collector
//!     ├── Container ────► visit every entry (key order as stored)
//!     └── Leaf ─────────► skip
//! ```
//!
//! Input trees must be acyclic; depth is bounded only by the tree itself.

use super::collect::StyleCollector;
use super::error::PackError;
use super::node::{Composition, Node, is_truthy};
use serde_json::Value;

pub struct Walker<'w, 'a> {
    style_key: &'w str,
    collector: &'w mut StyleCollector<'a>,
    /// Keys from the root to the node being visited, for error messages.
    trail: Vec<String>,
}

impl<'w, 'a> Walker<'w, 'a> {
    pub fn new(style_key: &'w str, collector: &'w mut StyleCollector<'a>) -> Self {
        Self {
            style_key,
            collector,
            trail: Vec::new(),
        }
    }

    /// Visit every entry of `root`.
    pub fn walk(&mut self, root: &Value) -> Result<(), PackError> {
        self.visit_entries(root)
    }

    fn visit_entries(&mut self, value: &Value) -> Result<(), PackError> {
        match value {
            Value::Object(entries) => entries
                .iter()
                .try_for_each(|(key, value)| self.visit(key, value)),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .try_for_each(|(index, value)| self.visit(&index.to_string(), value)),
            _ => Ok(()),
        }
    }

    fn visit(&mut self, key: &str, value: &Value) -> Result<(), PackError> {
        self.trail.push(key.to_owned());
        let result = match Node::classify(key, value, self.style_key) {
            Node::Composition(composition) => self.visit_composition(composition),
            Node::Style(style) => {
                self.collector.collect_value(style);
                Ok(())
            }
            Node::Container(value) => self.visit_entries(value),
            Node::Leaf => Ok(()),
        };
        self.trail.pop();
        result
    }

    /// Owner style first, then the ordered blocks; names without a declared
    /// block are skipped.
    fn visit_composition(&mut self, composition: Composition<'_>) -> Result<(), PackError> {
        let order = composition.order(|| self.pointer())?;

        if let Some(style) = composition.own(self.style_key)
            && is_truthy(style)
        {
            self.collector.collect_value(style);
        }

        for name in order {
            let Some(options) = composition.block_options(name) else {
                continue;
            };
            self.trail.push(format!("0/param/blocks/{name}/opt"));
            let result = self.visit_entries(options);
            self.trail.pop();
            result?;
        }

        Ok(())
    }

    /// JSON-pointer-like location of the current node.
    fn pointer(&self) -> String {
        self.trail.iter().fold(String::new(), |mut out, key| {
            out.push('/');
            out.push_str(key);
            out
        })
    }
}
