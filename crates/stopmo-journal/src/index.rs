//! Tracked-file index

use std::fs;
use std::path::PathBuf;

use stopmo_core::{atomic_write, Error, Result, TrackedPath};

/// The set of paths under version control
///
/// Stored one path per line in insertion order. Listing preserves the
/// order paths were first tracked.
pub struct FileIndex {
    path: PathBuf,
    tmp_dir: PathBuf,
}

impl FileIndex {
    pub fn new(path: PathBuf, tmp_dir: PathBuf) -> Self {
        Self { path, tmp_dir }
    }

    /// All tracked paths in insertion order
    pub fn tracked(&self) -> Result<Vec<TrackedPath>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(Error::store_io(&self.path, err)),
        };
        text.lines()
            .filter(|line| !line.is_empty())
            .map(TrackedPath::new)
            .collect()
    }

    /// Whether `path` is already tracked
    pub fn is_tracked(&self, path: &TrackedPath) -> Result<bool> {
        Ok(self.tracked()?.contains(path))
    }

    /// Add a path to the index; tracking an already-tracked path is a no-op
    pub fn track(&self, path: &TrackedPath) -> Result<()> {
        let mut tracked = self.tracked()?;
        if tracked.contains(path) {
            return Ok(());
        }
        tracked.push(path.clone());

        let mut out = tracked
            .iter()
            .map(TrackedPath::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        out.push('\n');
        atomic_write(&self.tmp_dir, &self.path, out.as_bytes())
    }
}
