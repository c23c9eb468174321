//! Style compilation.
//!
//! Manifests are compiled by an external Sass executable. The pipeline
//! only talks to [`StyleCompiler`], so tests can swap in a recording fake.

use crate::config::PackConfig;
use crate::utils::exec::{FilterRule, exec, to_os_args};
use anyhow::{Context, Result};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Sass filter: skip `@import` deprecation noise, every manifest is made of them.
pub static SASS_FILTER: FilterRule = FilterRule::new(&[
    "Deprecation Warning",
    "More info and automated migrator",
    "╷",
    "│",
    "╵",
]);

/// Compiles manifest text into CSS.
///
/// Relative references resolve against `load_path`.
pub trait StyleCompiler: Sync {
    /// Compile manifest text and return the stylesheet.
    fn compile_source(&self, source: &str, load_path: &Path) -> Result<String>;

    /// Compile a manifest file into a stylesheet file.
    fn compile_file(&self, input: &Path, output: &Path, load_path: &Path) -> Result<()>;
}

/// The configured `sass` executable, producing compressed CSS without
/// source maps.
#[derive(Debug, Clone)]
pub struct SassCommand {
    command: Vec<OsString>,
    args: Vec<OsString>,
    root: Option<PathBuf>,
}

impl SassCommand {
    pub fn new(config: &PackConfig) -> Self {
        Self {
            command: to_os_args(&config.compiler.command),
            args: to_os_args(&config.compiler.args),
            root: config
                .config_path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(Path::to_path_buf),
        }
    }

    fn args(&self, load_path: &Path, extra: &[&str]) -> Vec<OsString> {
        let mut args = self.args.clone();
        args.extend(to_os_args(&["--style=compressed", "--no-source-map"]));
        args.push(OsString::from(format!("--load-path={}", load_path.display())));
        args.extend(to_os_args(extra));
        args
    }
}

impl StyleCompiler for SassCommand {
    fn compile_source(&self, source: &str, load_path: &Path) -> Result<String> {
        let args = self.args(load_path, &["--stdin", "--indented"]);
        let output = exec(
            self.root.as_deref(),
            &self.command,
            &args,
            Some(source.as_bytes()),
            &SASS_FILTER,
        )?;
        String::from_utf8(output.stdout).context("Sass produced non UTF-8 output")
    }

    fn compile_file(&self, input: &Path, output: &Path, load_path: &Path) -> Result<()> {
        let mut args = self.args(load_path, &[]);
        args.push(input.as_os_str().to_owned());
        args.push(output.as_os_str().to_owned());
        exec(self.root.as_deref(), &self.command, &args, None, &SASS_FILTER)
            .with_context(|| format!("Failed to compile `{}`", input.display()))?;
        Ok(())
    }
}
