//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [styles] Section Defaults
// ============================================================================

pub mod styles {
    pub fn path_key() -> String {
        "stylesPath".into()
    }

    pub fn suffixes() -> Vec<String> {
        vec![".sass".into(), ".scss".into()]
    }
}

// ============================================================================
// [compiler] Section Defaults
// ============================================================================

pub mod compiler {
    pub fn command() -> Vec<String> {
        vec!["sass".into()]
    }

    pub fn args() -> Vec<String> {
        Vec::new()
    }
}

// ============================================================================
// [data] Section Defaults
// ============================================================================

pub mod data {
    pub fn page_key() -> String {
        "toMerge".into()
    }

    pub fn style_data_key() -> String {
        "styleData".into()
    }
}
