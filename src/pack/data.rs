//! Page data loading and merging.

use super::error::PackError;
use crate::config::BuildEnv;
use crate::utils::merge::deep_merge;
use serde_json::Value;
use std::{fs, path::Path};

/// Top-level field receiving the environment name.
pub const ENV_KEY: &str = "env";

/// Read a JSON document from disk.
pub fn read_json(path: &Path) -> Result<Value, PackError> {
    let content = fs::read_to_string(path).map_err(|err| PackError::Io(path.to_path_buf(), err))?;
    serde_json::from_str(&content).map_err(|err| PackError::Json(path.to_path_buf(), err))
}

/// Data of a page document: the `page_key` field when present, otherwise
/// the whole document. Must be an object.
pub fn page_data(document: Value, page_key: &str, path: &Path) -> Result<Value, PackError> {
    let data = match document {
        Value::Object(mut map) if map.contains_key(page_key) => map.remove(page_key).unwrap_or_default(),
        other => other,
    };

    if !data.is_object() {
        return Err(PackError::InvalidData(format!(
            "data of `{}` must be an object",
            path.display()
        )));
    }
    Ok(data)
}

/// Load one data file the way pages and shared data are both read.
pub fn load(path: &Path, page_key: &str) -> Result<Value, PackError> {
    page_data(read_json(path)?, page_key, path)
}

/// Shared data overlaid with page data, then `env` set.
pub fn merge(mut shared: Value, page: Value, env: &BuildEnv) -> Value {
    deep_merge(&mut shared, page);
    if let Value::Object(map) = &mut shared {
        map.insert(ENV_KEY.to_owned(), Value::String(env.name().to_owned()));
    }
    shared
}
