//! Errors raised while packing one page.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("no `src` segment in `{0}`, cannot infer project root")]
    NoProjectRoot(PathBuf),

    #[error("shared data `crosspages/page.json` not found, searched: {}", display_paths(.searched))]
    CrossDataNotFound { searched: Vec<PathBuf> },

    #[error("composition at `{at}` has no ordering for modifier `{modifier}` and no `default`")]
    MissingDefaultOrder { at: String, modifier: String },

    #[error("composition at `{at}` has a non-string ordering for `{modifier}`")]
    InvalidOrder { at: String, modifier: String },

    #[error("{0}")]
    InvalidData(String),

    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid JSON in `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("`{}`", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_data_not_found_lists_candidates() {
        let err = PackError::CrossDataNotFound {
            searched: vec![
                PathBuf::from("/site/src/data/crosspages/page.json"),
                PathBuf::from("/site/crosspages/page.json"),
            ],
        };
        let display = err.to_string();
        assert!(display.contains("`/site/src/data/crosspages/page.json`"));
        assert!(display.contains("`/site/crosspages/page.json`"));
    }

    #[test]
    fn test_missing_default_order_display() {
        let err = PackError::MissingDefaultOrder {
            at: "/main/contents".into(),
            modifier: "featured".into(),
        };
        let display = err.to_string();
        assert!(display.contains("featured"));
        assert!(display.contains("/main/contents"));
    }
}
