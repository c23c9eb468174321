//! Build environment selected on the command line.

use std::fmt;

/// Environment name of one build invocation.
///
/// Constructed once from `--env` and passed by reference to everything that
/// depends on it; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEnv(String);

impl Default for BuildEnv {
    fn default() -> Self {
        Self::new(Self::DEV)
    }
}

impl BuildEnv {
    pub const DEV: &'static str = "dev";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_dev(&self) -> bool {
        self.0 == Self::DEV
    }

    /// Top-level output directory: `dest` while developing, `prod` otherwise.
    pub fn output_dir(&self) -> &'static str {
        if self.is_dev() { "dest" } else { "prod" }
    }
}

impl fmt::Display for BuildEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dev() {
        let env = BuildEnv::default();
        assert!(env.is_dev());
        assert_eq!(env.output_dir(), "dest");
        assert_eq!(env.to_string(), "dev");
    }

    #[test]
    fn test_any_other_name_is_prod_output() {
        assert_eq!(BuildEnv::new("prod").output_dir(), "prod");
        assert_eq!(BuildEnv::new("stage").output_dir(), "prod");
        assert_eq!(BuildEnv::new("stage").name(), "stage");
    }
}
