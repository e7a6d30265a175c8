//! Error types shared by the stopmo library crates

use crate::digest::ContentDigest;
use std::path::PathBuf;
use thiserror::Error;

/// Common result type used throughout the stopmo libraries
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the storage and journal layers
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO failure at {}: {source}", .path.display())]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Tracked file missing from working tree: {}", .0.display())]
    MissingSourceFile(PathBuf),

    #[error("Snapshot already exists for commit {0}")]
    DuplicateSnapshot(ContentDigest),

    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    #[error("Invalid tracked path: {0}")]
    InvalidPath(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Malformed commit record: {0}")]
    MalformedRecord(String),

    #[error("Repository already initialized at {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("Repository not initialized at {}", .0.display())]
    NotInitialized(PathBuf),
}

impl Error {
    /// Attach the failing path to an IO error
    pub fn store_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StoreIo {
            path: path.into(),
            source,
        }
    }
}
