//! Change evaluation and the snapshot commit flow

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use stopmo_core::{hash_bytes, Error, Result, TrackedPath};

use crate::record::{CommitId, CommitRecord};
use crate::repo::Repository;

/// What a commit attempt would do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitDecision {
    /// At least one tracked file differs from the latest snapshot
    Commit,
    /// Every tracked file matches the latest snapshot
    NoOp,
}

/// Result of a commit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A snapshot was written and a record appended
    Committed(CommitId),
    /// Nothing changed since the latest commit
    NothingToCommit,
}

/// Tracked file contents read once per invocation, so the bytes that are
/// hashed for comparison are the bytes that get snapshotted.
struct WorktreeScan {
    files: Vec<(TrackedPath, Vec<u8>)>,
    changed: bool,
}

impl Repository {
    /// Decide whether a commit would record anything, without writing
    pub fn evaluate(&self) -> Result<CommitDecision> {
        let scan = self.scan_worktree()?;
        Ok(if scan.changed {
            CommitDecision::Commit
        } else {
            CommitDecision::NoOp
        })
    }

    /// Commit tracked changes with the current wall-clock timestamp
    pub fn commit(&self, message: &str) -> Result<CommitOutcome> {
        self.commit_at(message, current_timestamp_ms())
    }

    /// Commit tracked changes with a caller-supplied timestamp
    pub fn commit_at(&self, message: &str, ts_unix_ms: u64) -> Result<CommitOutcome> {
        if message.is_empty() || message.contains('\n') || message.contains('\r') {
            return Err(Error::MalformedRecord(
                "commit message must be a single non-empty line".to_string(),
            ));
        }

        let scan = self.scan_worktree()?;
        if !scan.changed {
            tracing::debug!("No tracked changes, skipping commit");
            return Ok(CommitOutcome::NothingToCommit);
        }

        let log_text = self.log().text()?;
        let id = CommitId::derive(&log_text, ts_unix_ms);
        let author = self.identity().username()?.unwrap_or_default();
        // A hand-edited config file can hold what set_username rejects;
        // never let it reach the three-line record format.
        if author.contains('\n') || author.contains('\r') {
            return Err(Error::MalformedRecord(
                "author must be a single line".to_string(),
            ));
        }

        // Snapshot first: a crash between the two writes leaves an unreferenced
        // snapshot directory, never a log record without its snapshot.
        self.snapshots().write(id.digest(), &scan.files)?;
        let record = CommitRecord::new(id, author, message.to_string());
        self.log().append(&record)?;

        tracing::info!("Committed {} ({} files)", id, scan.files.len());
        Ok(CommitOutcome::Committed(id))
    }

    /// Whether a snapshot exists for `id`
    pub fn has_commit(&self, id: &CommitId) -> bool {
        self.snapshots().contains(id.digest())
    }

    /// Overwrite the worktree with the snapshot for `id`
    pub fn checkout(&self, id: &CommitId) -> Result<usize> {
        let restored = self.snapshots().restore(id.digest(), self.root())?;
        tracing::info!("Restored {} files from {}", restored, id);
        Ok(restored)
    }

    fn scan_worktree(&self) -> Result<WorktreeScan> {
        let tracked = self.index().tracked()?;
        if tracked.is_empty() {
            return Ok(WorktreeScan {
                files: Vec::new(),
                changed: false,
            });
        }

        let mut files = Vec::with_capacity(tracked.len());
        for path in &tracked {
            let full = path.in_root(self.root());
            let data = fs::read(&full).map_err(|err| {
                if err.kind() == std::io::ErrorKind::NotFound {
                    Error::MissingSourceFile(PathBuf::from(path.as_str()))
                } else {
                    Error::store_io(full.clone(), err)
                }
            })?;
            files.push((path.clone(), data));
        }

        let changed = match self.log().latest_id()? {
            None => true,
            Some(latest) => {
                let stored = self.snapshots().snapshot_hashes(latest.digest(), &tracked)?;
                files.iter().any(|(path, data)| {
                    let current = hash_bytes(data);
                    stored.get(path) != Some(&current)
                })
            }
        };

        Ok(WorktreeScan { files, changed })
    }
}

fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}
