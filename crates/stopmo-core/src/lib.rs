//! Stopmo Core - Storage primitives for the stopmo commit system
//!
//! This crate provides the foundational storage layer:
//! - BLAKE3 content digests
//! - Tracked-path normalization
//! - Write-once snapshot directories
//! - Atomic file persistence

pub mod digest;
pub mod error;
pub mod paths;
pub mod snapshot;

// Re-export main types for convenience
pub use digest::{hash_bytes, hash_file, ContentDigest, IncrementalHasher};
pub use error::{Error, Result};
pub use paths::TrackedPath;
pub use snapshot::{atomic_write, SnapshotStore};
