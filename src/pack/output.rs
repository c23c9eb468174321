//! Output locations of one packed page.
//!
//! ```text
//! <root>/temp/styles/[custom/a/b/]<name>.sass        file manifest
//! <root>/<dest|prod>/public/styles/[custom/a/b/]<name>.css  compiled file styles
//! <root>/temp/pages/[custom/a/b/]<name>.json         page payload
//! ```
//!
//! Pages under a `/custom/<a>/<b>/` path are custom variants: their
//! outputs go to the matching subdirectory instead of the shared bundle
//! location.

use super::error::PackError;
use crate::config::BuildEnv;
use crate::utils::path::to_slash;
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

const TEMP_DIR: &str = "temp";
const STYLES_DIR: &str = "styles";
const PAGES_DIR: &str = "pages";
const PUBLIC_DIR: &str = "public";

/// `custom/<a>/<b>` segment of a custom variant page path.
pub fn custom_subdir(file: &Path) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"/custom/[a-z0-9_-]+/[a-z0-9_-]+/").expect("custom variant pattern is valid")
    });
    let slashed = to_slash(file);
    re.find(&slashed)
        .map(|found| found.as_str().trim_matches('/').to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
    env_dir: &'static str,
    custom: Option<String>,
    name: String,
}

impl OutputLayout {
    pub fn new(root: &Path, file: &Path, env: &BuildEnv) -> Result<Self, PackError> {
        let name = file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| PackError::InvalidData(format!("`{}` has no file name", file.display())))?;

        Ok(Self {
            root: root.to_path_buf(),
            env_dir: env.output_dir(),
            custom: custom_subdir(file),
            name,
        })
    }

    fn under(&self, base: PathBuf) -> PathBuf {
        match &self.custom {
            Some(custom) => base.join(custom),
            None => base,
        }
    }

    pub fn temp_manifest(&self) -> PathBuf {
        self.under(self.root.join(TEMP_DIR).join(STYLES_DIR))
            .join(format!("{}.sass", self.name))
    }

    pub fn styles_dir(&self) -> PathBuf {
        self.under(self.root.join(self.env_dir).join(PUBLIC_DIR).join(STYLES_DIR))
    }

    pub fn stylesheet(&self) -> PathBuf {
        self.styles_dir().join(format!("{}.css", self.name))
    }

    pub fn payload(&self) -> PathBuf {
        self.under(self.root.join(TEMP_DIR).join(PAGES_DIR))
            .join(format!("{}.json", self.name))
    }
}

/// Write `content` to `path`, creating missing parent directories.
pub fn write_file(path: &Path, content: impl AsRef<[u8]>) -> Result<(), PackError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| PackError::Io(parent.to_path_buf(), err))?;
    }
    fs::write(path, content).map_err(|err| PackError::Io(path.to_path_buf(), err))
}
