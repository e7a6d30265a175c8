//! Repository handle and on-disk layout

use std::fs;
use std::path::{Path, PathBuf};

use stopmo_core::{Error, Result, SnapshotStore};

use crate::identity::Identity;
use crate::index::FileIndex;
use crate::log::CommitLog;

/// Name of the metadata directory inside a worktree
pub const STOPMO_DIR: &str = ".stopmo";

/// Handle to one repository
///
/// All state lives under a single metadata directory inside the worktree:
/// ```text
/// <root>/.stopmo/
///   config.txt    # author identity
///   index.txt     # tracked paths
///   log.txt       # commit records, newest first
///   snapshots/    # one directory per commit
///   tmp/          # staging for atomic writes
/// ```
pub struct Repository {
    root: PathBuf,
    stopmo_dir: PathBuf,
    identity: Identity,
    index: FileIndex,
    log: CommitLog,
    snapshots: SnapshotStore,
}

impl Repository {
    /// Create the metadata directory and empty stores under `root`
    pub fn init(root: &Path) -> Result<Self> {
        let stopmo_dir = root.join(STOPMO_DIR);
        if stopmo_dir.exists() {
            return Err(Error::AlreadyInitialized(root.to_path_buf()));
        }

        fs::create_dir(&stopmo_dir).map_err(|err| Error::store_io(&stopmo_dir, err))?;
        for sub in ["snapshots", "tmp"] {
            let dir = stopmo_dir.join(sub);
            fs::create_dir_all(&dir).map_err(|err| Error::store_io(&dir, err))?;
        }
        for file in ["config.txt", "index.txt", "log.txt"] {
            let path = stopmo_dir.join(file);
            fs::write(&path, "").map_err(|err| Error::store_io(&path, err))?;
        }

        Ok(Self::assemble(root.to_path_buf(), stopmo_dir))
    }

    /// Open an existing repository under `root`
    pub fn open(root: &Path) -> Result<Self> {
        let stopmo_dir = root.join(STOPMO_DIR);
        if !stopmo_dir.is_dir() {
            return Err(Error::NotInitialized(root.to_path_buf()));
        }
        Ok(Self::assemble(root.to_path_buf(), stopmo_dir))
    }

    /// Whether `root` already holds a repository
    pub fn is_initialized(root: &Path) -> bool {
        root.join(STOPMO_DIR).is_dir()
    }

    fn assemble(root: PathBuf, stopmo_dir: PathBuf) -> Self {
        let tmp_dir = stopmo_dir.join("tmp");
        Self {
            root,
            identity: Identity::new(stopmo_dir.join("config.txt"), tmp_dir.clone()),
            index: FileIndex::new(stopmo_dir.join("index.txt"), tmp_dir.clone()),
            log: CommitLog::new(stopmo_dir.join("log.txt"), tmp_dir.clone()),
            snapshots: SnapshotStore::new(stopmo_dir.join("snapshots"), tmp_dir),
            stopmo_dir,
        }
    }

    /// Worktree root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Metadata directory
    pub fn stopmo_dir(&self) -> &Path {
        &self.stopmo_dir
    }

    /// Author identity store
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Tracked-file index
    pub fn index(&self) -> &FileIndex {
        &self.index
    }

    /// Commit log
    pub fn log(&self) -> &CommitLog {
        &self.log
    }

    /// Snapshot store
    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_layout() -> Result<()> {
        let dir = tempdir()?;
        let repo = Repository::init(dir.path())?;

        let stopmo = dir.path().join(".stopmo");
        assert_eq!(repo.stopmo_dir(), stopmo);
        assert!(stopmo.join("snapshots").is_dir());
        assert!(stopmo.join("tmp").is_dir());
        assert!(stopmo.join("config.txt").is_file());
        assert!(stopmo.join("index.txt").is_file());
        assert!(stopmo.join("log.txt").is_file());
        Ok(())
    }

    #[test]
    fn test_double_init_fails() -> Result<()> {
        let dir = tempdir()?;
        Repository::init(dir.path())?;

        let result = Repository::init(dir.path());
        assert!(matches!(result, Err(Error::AlreadyInitialized(_))));
        Ok(())
    }

    #[test]
    fn test_open_requires_init() {
        let dir = tempdir().unwrap();
        let result = Repository::open(dir.path());
        assert!(matches!(result, Err(Error::NotInitialized(_))));
    }

    #[test]
    fn test_open_after_init() -> Result<()> {
        let dir = tempdir()?;
        assert!(!Repository::is_initialized(dir.path()));

        Repository::init(dir.path())?;
        assert!(Repository::is_initialized(dir.path()));

        let repo = Repository::open(dir.path())?;
        assert_eq!(repo.root(), dir.path());
        Ok(())
    }
}
