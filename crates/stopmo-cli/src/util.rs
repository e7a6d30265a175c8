//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use stopmo_journal::{Repository, STOPMO_DIR};

/// Find the repository root by walking up from cwd to find .stopmo/
pub fn find_repo_root() -> Result<PathBuf> {
    let current = std::env::current_dir().context("Failed to get current directory")?;
    Ok(find_repo_root_from(&current))
}

/// Walk up from `start` looking for an existing repository; fall back to
/// `start` itself when none is found (first use initializes there)
fn find_repo_root_from(start: &Path) -> PathBuf {
    let mut current = start.to_path_buf();

    loop {
        let stopmo_dir = current.join(STOPMO_DIR);
        if stopmo_dir.is_dir() {
            return current;
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return start.to_path_buf(),
        }
    }
}

/// Open the enclosing repository, initializing one in cwd if none exists
pub fn open_or_init() -> Result<Repository> {
    let root = find_repo_root()?;
    let repo = if Repository::is_initialized(&root) {
        Repository::open(&root)
    } else {
        Repository::init(&root)
    };
    repo.with_context(|| format!("Failed to open repository at {}", root.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_find_root_from_nested_dir() -> Result<()> {
        let dir = tempdir()?;
        Repository::init(dir.path())?;

        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested)?;

        assert_eq!(find_repo_root_from(&nested), dir.path());
        Ok(())
    }

    #[test]
    fn test_find_root_falls_back_to_start() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(find_repo_root_from(dir.path()), dir.path());
        Ok(())
    }
}
