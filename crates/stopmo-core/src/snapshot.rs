//! Write-once snapshot storage and atomic file persistence

use crate::digest::{hash_file, ContentDigest};
use crate::error::{Error, Result};
use crate::paths::TrackedPath;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// On-disk store of commit snapshots
///
/// Manages a `snapshots/` directory with one subdirectory per commit id,
/// each holding a full copy of every file tracked at commit time:
/// ```text
/// snapshots/
///   <commit-id>/
///     <tracked paths, directory structure preserved>
/// ```
/// Snapshot directories are write-once. A snapshot is staged in full under
/// the tmp directory and renamed into place, and an existing directory is
/// never overwritten.
pub struct SnapshotStore {
    snapshots_dir: PathBuf,
    tmp_dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store over the given snapshot and staging directories
    pub fn new(snapshots_dir: PathBuf, tmp_dir: PathBuf) -> Self {
        Self {
            snapshots_dir,
            tmp_dir,
        }
    }

    /// Whether a snapshot exists for the given id
    pub fn contains(&self, id: &ContentDigest) -> bool {
        self.snapshot_dir(id).is_dir()
    }

    /// Directory holding the snapshot for the given id
    pub fn snapshot_dir(&self, id: &ContentDigest) -> PathBuf {
        self.snapshots_dir.join(id.to_hex())
    }

    /// Write a new snapshot holding the given file contents
    ///
    /// A failed write never leaves a partial snapshot behind: the staging
    /// directory is removed on error and the final directory only appears
    /// through the rename.
    pub fn write(&self, id: &ContentDigest, files: &[(TrackedPath, Vec<u8>)]) -> Result<()> {
        let final_dir = self.snapshot_dir(id);
        if final_dir.exists() {
            return Err(Error::DuplicateSnapshot(*id));
        }

        fs::create_dir_all(&self.tmp_dir).map_err(|e| Error::store_io(&self.tmp_dir, e))?;
        let stage_dir = self
            .tmp_dir
            .join(format!("snapshot-{}", uuid::Uuid::new_v4()));

        if let Err(err) = stage_and_rename(&stage_dir, &final_dir, files) {
            let _ = fs::remove_dir_all(&stage_dir);
            return Err(err);
        }
        Ok(())
    }

    /// Digest the stored copies of the given paths within a snapshot
    ///
    /// Paths without a stored copy are absent from the result rather than
    /// an error, so callers can treat them as changed.
    pub fn snapshot_hashes(
        &self,
        id: &ContentDigest,
        paths: &[TrackedPath],
    ) -> Result<BTreeMap<TrackedPath, ContentDigest>> {
        let dir = self.snapshot_dir(id);
        let mut hashes = BTreeMap::new();
        for path in paths {
            let stored = path.in_root(&dir);
            if !stored.is_file() {
                continue;
            }
            hashes.insert(path.clone(), hash_file(&stored)?);
        }
        Ok(hashes)
    }

    /// Copy every file of a snapshot back into the working tree
    ///
    /// Directory structure is preserved and files absent from the snapshot
    /// are left untouched. Returns the number of files restored.
    pub fn restore(&self, id: &ContentDigest, worktree_root: &Path) -> Result<usize> {
        let dir = self.snapshot_dir(id);
        if !dir.is_dir() {
            return Err(Error::store_io(
                &dir,
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ));
        }

        let mut restored = 0;
        for entry in WalkDir::new(&dir) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| dir.clone());
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("walk failed"));
                    return Err(Error::StoreIo { path, source });
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(&dir).map_err(|_| {
                Error::store_io(
                    entry.path(),
                    std::io::Error::other("entry outside snapshot directory"),
                )
            })?;
            let target = worktree_root.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::store_io(parent, e))?;
            }
            fs::copy(entry.path(), &target).map_err(|e| Error::store_io(&target, e))?;
            restored += 1;
        }

        Ok(restored)
    }
}

/// Build the snapshot under `stage_dir`, then rename it to `final_dir`
fn stage_and_rename(
    stage_dir: &Path,
    final_dir: &Path,
    files: &[(TrackedPath, Vec<u8>)],
) -> Result<()> {
    fs::create_dir(stage_dir).map_err(|e| Error::store_io(stage_dir, e))?;

    for (path, data) in files {
        let target = path.in_root(stage_dir);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::store_io(parent, e))?;
        }
        let mut file = fs::File::create(&target).map_err(|e| Error::store_io(&target, e))?;
        file.write_all(data).map_err(|e| Error::store_io(&target, e))?;
        file.sync_all().map_err(|e| Error::store_io(&target, e))?;
    }

    if let Some(parent) = final_dir.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::store_io(parent, e))?;
    }
    fs::rename(stage_dir, final_dir).map_err(|e| Error::store_io(final_dir, e))?;

    // Fsync the snapshots directory for durability
    if let Some(parent) = final_dir.parent() {
        if let Ok(dir) = fs::File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}

/// Atomic write helper
///
/// Writes data to a uniquely named temporary file, fsyncs it, then renames
/// it over the target path.
pub fn atomic_write(tmp_dir: &Path, target: &Path, data: &[u8]) -> Result<()> {
    fs::create_dir_all(tmp_dir).map_err(|e| Error::store_io(tmp_dir, e))?;

    let temp_path = tmp_dir.join(uuid::Uuid::new_v4().to_string());

    let mut temp_file = fs::File::create(&temp_path).map_err(|e| Error::store_io(&temp_path, e))?;
    temp_file
        .write_all(data)
        .map_err(|e| Error::store_io(&temp_path, e))?;
    temp_file
        .sync_all()
        .map_err(|e| Error::store_io(&temp_path, e))?;
    drop(temp_file);

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::store_io(parent, e))?;
    }

    // Rename to target (atomic on POSIX systems)
    fs::rename(&temp_path, target).map_err(|e| Error::store_io(target, e))?;

    // Fsync parent directory for durability
    if let Some(parent) = target.parent() {
        if let Ok(dir) = fs::File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}
