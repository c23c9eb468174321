//! Separator-agnostic path helpers.
//!
//! Style references and data locations are handled as `/`-separated
//! strings so the same rules apply on every platform.

use std::path::{Path, PathBuf};

/// Canonical path separator.
pub const SEPARATOR: char = '/';

/// Replace every run of backslashes with a single `/`.
pub fn normalize_separators(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for ch in s.chars() {
        if ch == '\\' {
            if !in_run {
                out.push(SEPARATOR);
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// Render a path as a normalized `/`-separated string.
pub fn to_slash(path: &Path) -> String {
    normalize_separators(&path.to_string_lossy())
}

/// Drop the last `/`-separated segment.
///
/// Walking above the first segment yields the empty string, so joining a
/// suffix afterwards produces a path anchored at the filesystem root.
pub fn parent_dir(path: &str) -> &str {
    path.rsplit_once(SEPARATOR).map_or("", |(head, _)| head)
}

/// Project root: everything before the first `src` segment of `file`.
///
/// `/var/www/site/src/data/index.json` → `/var/www/site/`
pub fn project_root(file: &Path) -> Option<PathBuf> {
    let slashed = to_slash(file);
    let mut root = String::new();
    for segment in slashed.split(SEPARATOR) {
        if segment == "src" {
            return Some(PathBuf::from(root));
        }
        root.push_str(segment);
        root.push(SEPARATOR);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize_separators(r"C:\site\\src\data"), "C:/site/src/data");
        assert_eq!(normalize_separators("/already/fine"), "/already/fine");
        assert_eq!(normalize_separators(""), "");
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir("/a/b/c"), "/a/b");
        assert_eq!(parent_dir("/a"), "");
        assert_eq!(parent_dir(""), "");
        assert_eq!(parent_dir("relative"), "");
    }

    #[test]
    fn test_project_root() {
        assert_eq!(
            project_root(Path::new("/var/www/site/src/data/index.json")),
            Some(PathBuf::from("/var/www/site/"))
        );
        assert_eq!(
            project_root(Path::new(r"D:\work\site\src\data\index.json")),
            Some(PathBuf::from("D:/work/site/"))
        );
    }

    #[test]
    fn test_project_root_matches_whole_segment() {
        assert_eq!(
            project_root(Path::new("/home/srcuser/site/src/data/a.json")),
            Some(PathBuf::from("/home/srcuser/site/"))
        );
        assert_eq!(project_root(Path::new("/home/site/data/a.json")), None);
    }

    #[test]
    fn test_project_root_first_src_wins() {
        assert_eq!(
            project_root(Path::new("/site/src/blocks/src/a.json")),
            Some(PathBuf::from("/site/"))
        );
    }
}
