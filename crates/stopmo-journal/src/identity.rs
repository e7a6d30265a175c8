//! Author identity configuration

use std::fs;
use std::path::PathBuf;

use stopmo_core::{atomic_write, Error, Result};

/// The configured username, stored as a single line
pub struct Identity {
    path: PathBuf,
    tmp_dir: PathBuf,
}

impl Identity {
    pub fn new(path: PathBuf, tmp_dir: PathBuf) -> Self {
        Self { path, tmp_dir }
    }

    /// The configured username, or None when unset or blank
    pub fn username(&self) -> Result<Option<String>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Error::store_io(&self.path, err)),
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    /// Replace the configured username
    ///
    /// Names must fit the single-line commit record format.
    pub fn set_username(&self, name: &str) -> Result<()> {
        if name.contains('\n') || name.contains('\r') {
            return Err(Error::InvalidUsername(name.to_string()));
        }
        atomic_write(&self.tmp_dir, &self.path, format!("{name}\n").as_bytes())
    }
}
