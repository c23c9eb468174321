//! Errors raised while loading `stylepack.toml` or checking it against the
//! invocation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read packer config `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("invalid packer config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("[styles.path_key] must not be empty")]
    EmptyPathKey,

    #[error("[compiler.command] must name an executable")]
    EmptyCommand,

    #[error("[styles.core] must declare a `{0}` group")]
    MissingCoreGroup(&'static str),

    #[error("--env must not be empty")]
    EmptyEnv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_read_error_names_file_and_keeps_cause() {
        let err = ConfigError::Read(
            PathBuf::from("site/stylepack.toml"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "cannot read packer config `site/stylepack.toml`");
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("denied"));
    }

    #[test]
    fn test_parse_error_carries_toml_message() {
        let toml_err = toml::from_str::<toml::Table>("[styles\npath_key = 1").unwrap_err();
        let err = ConfigError::from(toml_err);
        assert!(err.to_string().starts_with("invalid packer config: "));
        assert!(err.to_string().len() > "invalid packer config: ".len());
    }

    #[test]
    fn test_validation_messages_name_the_setting() {
        assert!(ConfigError::EmptyPathKey.to_string().contains("[styles.path_key]"));
        assert!(ConfigError::EmptyCommand.to_string().contains("[compiler.command]"));
        assert_eq!(
            ConfigError::MissingCoreGroup("common").to_string(),
            "[styles.core] must declare a `common` group"
        );
        assert!(ConfigError::EmptyEnv.to_string().starts_with("--env"));
    }
}
