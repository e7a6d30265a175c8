//! Tracked-path normalization

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// A normalized repository-relative path
///
/// Stored with `/` separators, no leading `./` and no `..` components, so
/// the same string names the file in the index, in snapshot directories and
/// in the working tree.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct TrackedPath(String);

impl TrackedPath {
    /// Normalize a raw path string
    ///
    /// - Rejects absolute paths and `..` traversal
    /// - Rejects control characters
    /// - Removes a leading `./`
    /// - Converts backslashes to forward slashes
    pub fn new(raw: &str) -> Result<Self> {
        let stripped = raw.strip_prefix("./").unwrap_or(raw);
        let normalized = stripped.replace('\\', "/");
        if normalized.is_empty() {
            return Err(Error::InvalidPath(raw.to_string()));
        }
        // Newlines would split the stored index line in two
        if normalized.chars().any(char::is_control) {
            return Err(Error::InvalidPath(raw.to_string()));
        }

        // Validate the normalized form, so traversal cannot hide behind
        // backslash separators
        let path = Path::new(&normalized);
        if path.is_absolute() {
            return Err(Error::InvalidPath(raw.to_string()));
        }
        for component in path.components() {
            match component {
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::InvalidPath(raw.to_string()));
                }
                _ => {}
            }
        }

        Ok(Self(normalized))
    }

    /// The path as stored in the index
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against a directory root
    pub fn in_root(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

impl std::fmt::Display for TrackedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_accepted() {
        let path = TrackedPath::new("src/main.rs").unwrap();
        assert_eq!(path.as_str(), "src/main.rs");
    }

    #[test]
    fn test_dot_prefix_stripped() {
        assert_eq!(TrackedPath::new("./file.txt").unwrap().as_str(), "file.txt");
        assert_eq!(
            TrackedPath::new("./src/lib.rs").unwrap().as_str(),
            "src/lib.rs"
        );
    }

    #[test]
    fn test_backslashes_converted() {
        let path = TrackedPath::new("src\\main.rs").unwrap();
        assert_eq!(path.as_str(), "src/main.rs");
    }

    #[test]
    fn test_rejects_parent_dir() {
        assert!(TrackedPath::new("../secret.txt").is_err());
        assert!(TrackedPath::new("src/../../etc/passwd").is_err());
    }

    #[test]
    fn test_rejects_backslash_traversal() {
        assert!(TrackedPath::new("a\\..\\b").is_err());
    }

    #[test]
    fn test_rejects_absolute() {
        assert!(TrackedPath::new("/etc/passwd").is_err());
    }

    #[test]
    fn test_rejects_control_characters() {
        assert!(TrackedPath::new("two\nlines.txt").is_err());
        assert!(TrackedPath::new("return\r.txt").is_err());
        assert!(TrackedPath::new("tab\t.txt").is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(TrackedPath::new("").is_err());
        assert!(TrackedPath::new("./").is_err());
    }

    #[test]
    fn test_in_root_joins() {
        let path = TrackedPath::new("a/b.txt").unwrap();
        assert_eq!(
            path.in_root(Path::new("/tmp/repo")),
            PathBuf::from("/tmp/repo/a/b.txt")
        );
    }
}
