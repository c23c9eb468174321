//! Shared template data lookup.
//!
//! Shared data lives at `crosspages/page.json`, searched in three places
//! relative to the directory of the page being packed:
//!
//! ```text
//! <dir>/crosspages/page.json                 level 0
//! <dir>/../../crosspages/page.json           level 2 up
//! <dir>/../../../../data/crosspages/page.json  level 4 up, under data/
//! ```

use super::error::PackError;
use crate::utils::path::{SEPARATOR, parent_dir, to_slash};
use std::path::{Path, PathBuf};

/// Location of the shared data file relative to a searched directory.
pub const CROSS_DATA_SUFFIX: &str = "/crosspages/page.json";

/// Directory entered at the last search level.
const DATA_DIR: &str = "data";

/// The three candidate locations, in search order.
pub fn candidates(dir: &Path) -> [PathBuf; 3] {
    let start = to_slash(dir);
    let start = start.trim_end_matches(SEPARATOR);
    let two_up = parent_dir(parent_dir(start));
    let four_up = parent_dir(parent_dir(two_up));

    [
        PathBuf::from(format!("{start}{CROSS_DATA_SUFFIX}")),
        PathBuf::from(format!("{two_up}{CROSS_DATA_SUFFIX}")),
        PathBuf::from(format!("{four_up}{SEPARATOR}{DATA_DIR}{CROSS_DATA_SUFFIX}")),
    ]
}

/// First existing candidate, or `None` when none exists.
pub fn find_cross_data(dir: &Path) -> Option<PathBuf> {
    candidates(dir).into_iter().find(|path| path.exists())
}

/// Like [`find_cross_data`], but a miss is an error naming every candidate.
pub fn locate_cross_data(dir: &Path) -> Result<PathBuf, PackError> {
    find_cross_data(dir).ok_or_else(|| PackError::CrossDataNotFound {
        searched: candidates(dir).into(),
    })
}
