//! Packer configuration management for `stylepack.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                          |
//! |--------------|--------------------------------------------------|
//! | `[styles]`   | Style descriptor field name, core style groups   |
//! | `[compiler]` | External style compiler command line             |
//! | `[data]`     | Page data and payload field names                |
//!
//! # Example
//!
//! ```toml
//! [styles]
//! path_key = "stylesPath"
//!
//! [styles.core.vendors]
//! slider = "vendors/vendor.slider.custom"
//!
//! [compiler]
//! command = ["sass"]
//!
//! [data]
//! style_data_key = "styleData"
//! ```

mod compiler;
pub mod defaults;
mod data;
mod env;
mod error;
mod styles;

pub use env::BuildEnv;
pub use styles::{BLOCKS_GROUP, COMMON_GROUP, CoreStyles, VENDORS_GROUP};

use compiler::CompilerConfig;
use data::DataConfig;
use error::ConfigError;
use styles::StylesConfig;

use crate::cli::Cli;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing stylepack.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PackConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Build environment of this invocation (from `--env`)
    #[serde(skip)]
    pub env: BuildEnv,

    /// Style collection settings
    #[serde(default)]
    pub styles: StylesConfig,

    /// External style compiler
    #[serde(default)]
    pub compiler: CompilerConfig,

    /// Page data field names
    #[serde(default)]
    pub data: DataConfig,
}

impl PackConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: PackConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Read(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Load `cli.config` under `cli.root`, falling back to defaults when the
    /// file doesn't exist, then apply CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        self.env = BuildEnv::new(cli.env.as_str());
    }

    /// Validate configuration before any page is processed
    pub fn validate(&self) -> Result<()> {
        if self.styles.path_key.is_empty() {
            bail!(ConfigError::EmptyPathKey);
        }

        if self.compiler.command.first().is_none_or(String::is_empty) {
            bail!(ConfigError::EmptyCommand);
        }

        if !self.styles.core.contains(COMMON_GROUP) {
            bail!(ConfigError::MissingCoreGroup(COMMON_GROUP));
        }

        if self.env.name().trim().is_empty() {
            bail!(ConfigError::EmptyEnv);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    #[test]
    fn test_site_config_default() {
        let config = PackConfig::default();
        assert_eq!(config.config_path, PathBuf::new());
        assert!(config.env.is_dev());
        assert_eq!(config.styles.path_key, "stylesPath");
        assert_eq!(config.compiler.command, ["sass"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(PackConfig::from_str("[styles\npath_key = 1").is_err());
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let result = PackConfig::from_str(
            r#"
            [server]
            port = 80
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_full_config_all_sections() {
        let config = PackConfig::from_str(
            r#"
            [styles]
            path_key = "styles"
            suffixes = [".sass"]

            [styles.core.global]
            reset = "global/reset"

            [compiler]
            command = ["dart-sass"]
            args = ["--load-path=node_modules"]

            [data]
            page_key = "page"
            style_data_key = "css"
        "#,
        )
        .unwrap();

        assert_eq!(config.styles.path_key, "styles");
        assert_eq!(config.styles.suffixes, [".sass"]);
        assert_eq!(config.styles.core.group("global").last(), Some(&"global/reset"));
        assert_eq!(config.compiler.command, ["dart-sass"]);
        assert_eq!(config.data.page_key, "page");
        assert_eq!(config.data.style_data_key, "css");
    }

    #[test]
    fn test_validate_rejects_empty_path_key() {
        let mut config = PackConfig::default();
        config.styles.path_key.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[styles.path_key]"));
    }

    #[test]
    fn test_validate_rejects_empty_command() {
        let mut config = PackConfig::default();
        config.compiler.command.clear();
        assert!(config.validate().is_err());

        config.compiler.command = vec![String::new()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_common_group() {
        let mut config = PackConfig::default();
        config.styles.core = CoreStyles::from_map(serde_json::Map::new());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("common"));
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingCoreGroup(COMMON_GROUP))
        ));
    }

    #[test]
    fn test_from_path_unreadable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stylepack.toml");
        let err = PackConfig::from_path(&path).unwrap_err();
        assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::Read(p, _)) if *p == path));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let cli = Cli::parse_from(["stylepack", "--root", &root, "--env", "prod", "inspect", "a.json"]);

        let config = PackConfig::load(&cli).unwrap();
        assert_eq!(config.env.name(), "prod");
        assert_eq!(config.config_path, PathBuf::new());
    }

    #[test]
    fn test_load_reads_config_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("stylepack.toml"),
            "[styles]\npath_key = \"css\"\n",
        )
        .unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let cli = Cli::parse_from(["stylepack", "--root", &root, "inspect", "a.json"]);

        let config = PackConfig::load(&cli).unwrap();
        assert_eq!(config.styles.path_key, "css");
        assert_eq!(config.config_path, dir.path().join("stylepack.toml"));
        assert!(config.env.is_dev());
    }
}
