//! `[compiler]` section configuration.
//!
//! The external style compiler that turns manifests into CSS.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[compiler]` section in stylepack.toml.
///
/// # Example
/// ```toml
/// [compiler]
/// command = ["npx", "sass"]
/// args = ["--quiet-deps"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    /// Command line of the compiler executable.
    #[serde(default = "defaults::compiler::command")]
    #[educe(Default = defaults::compiler::command())]
    pub command: Vec<String>,

    /// Extra arguments appended to every invocation.
    #[serde(default = "defaults::compiler::args")]
    #[educe(Default = defaults::compiler::args())]
    pub args: Vec<String>,
}
