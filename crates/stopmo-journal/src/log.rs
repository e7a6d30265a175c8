//! Append-only commit log, newest record first

use std::fs;
use std::path::PathBuf;

use stopmo_core::{atomic_write, Error, Result};

use crate::record::{CommitId, CommitRecord};

/// The commit log file
///
/// Records are stored newest-first as three-line blocks separated by a
/// blank line, with a single trailing newline. This module is the only
/// reader and writer of that layout.
pub struct CommitLog {
    path: PathBuf,
    tmp_dir: PathBuf,
}

impl CommitLog {
    pub fn new(path: PathBuf, tmp_dir: PathBuf) -> Self {
        Self { path, tmp_dir }
    }

    /// The raw log text; empty string when no commits exist yet
    pub fn text(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(Error::store_io(&self.path, err)),
        }
    }

    /// Whether the log holds no records
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.text()?.is_empty())
    }

    /// All records, newest first
    pub fn records(&self) -> Result<Vec<CommitRecord>> {
        parse_log(&self.text()?)
    }

    /// Id of the most recent commit, if any
    pub fn latest_id(&self) -> Result<Option<CommitId>> {
        Ok(self.records()?.first().map(|record| record.id))
    }

    /// Prepend a record, rewriting the whole file atomically
    pub fn append(&self, record: &CommitRecord) -> Result<()> {
        let existing = self.text()?;
        let mut out = record.serialize();
        out.push('\n');
        if !existing.is_empty() {
            out.push('\n');
            out.push_str(&existing);
        }
        atomic_write(&self.tmp_dir, &self.path, out.as_bytes())
    }
}

fn parse_log(text: &str) -> Result<Vec<CommitRecord>> {
    let body = text.trim_end_matches('\n');
    if body.is_empty() {
        return Ok(Vec::new());
    }
    body.split("\n\n").map(CommitRecord::deserialize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use stopmo_core::hash_bytes;
    use tempfile::tempdir;

    fn log_in(dir: &Path) -> CommitLog {
        CommitLog::new(dir.join("log.txt"), dir.join("tmp"))
    }

    fn record(seed: &[u8], author: &str, message: &str) -> CommitRecord {
        CommitRecord::new(
            CommitId::from_digest(hash_bytes(seed)),
            author.to_string(),
            message.to_string(),
        )
    }

    #[test]
    fn test_empty_log() -> Result<()> {
        let dir = tempdir()?;
        let log = log_in(dir.path());

        assert_eq!(log.text()?, "");
        assert!(log.is_empty()?);
        assert!(log.records()?.is_empty());
        assert!(log.latest_id()?.is_none());
        Ok(())
    }

    #[test]
    fn test_append_prepends_newest_first() -> Result<()> {
        let dir = tempdir()?;
        let log = log_in(dir.path());

        let first = record(b"one", "alice", "first");
        let second = record(b"two", "bob", "second");
        log.append(&first)?;
        log.append(&second)?;

        let records = log.records()?;
        assert_eq!(records, vec![second.clone(), first]);
        assert_eq!(log.latest_id()?, Some(second.id));
        assert!(!log.is_empty()?);
        Ok(())
    }

    #[test]
    fn test_file_layout_after_two_appends() -> Result<()> {
        let dir = tempdir()?;
        let log = log_in(dir.path());

        let first = record(b"one", "alice", "first");
        let second = record(b"two", "bob", "second");
        log.append(&first)?;
        log.append(&second)?;

        let expected = format!(
            "commit {}\nAuthor: bob\nsecond\n\ncommit {}\nAuthor: alice\nfirst\n",
            second.id, first.id
        );
        assert_eq!(fs::read_to_string(dir.path().join("log.txt"))?, expected);
        assert_eq!(log.text()?, expected);
        Ok(())
    }

    #[test]
    fn test_records_rejects_malformed_file() -> Result<()> {
        let dir = tempdir()?;
        let log = log_in(dir.path());

        fs::write(dir.path().join("log.txt"), "garbage\n")?;
        assert!(log.records().is_err());
        assert!(log.latest_id().is_err());
        Ok(())
    }

    #[test]
    fn test_parse_serialize_identity() -> Result<()> {
        let dir = tempdir()?;
        let log = log_in(dir.path());

        log.append(&record(b"one", "alice", "first"))?;
        log.append(&record(b"two", "", "no author"))?;

        let text = log.text()?;
        let rebuilt: Vec<String> = log.records()?.iter().map(CommitRecord::serialize).collect();
        assert_eq!(format!("{}\n", rebuilt.join("\n\n")), text);
        Ok(())
    }
}
