//! `[data]` section configuration.
//!
//! Field names used when reading page data and writing the page payload.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[data]` section in stylepack.toml.
///
/// # Example
/// ```toml
/// [data]
/// page_key = "toMerge"
/// style_data_key = "styleData"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// Field of a page document holding its data. When absent in a given
    /// document the whole document is used.
    #[serde(default = "defaults::data::page_key")]
    #[educe(Default = defaults::data::page_key())]
    pub page_key: String,

    /// Payload field receiving the compiled inline stylesheet.
    #[serde(default = "defaults::data::style_data_key")]
    #[educe(Default = defaults::data::style_data_key())]
    pub style_data_key: String,
}
