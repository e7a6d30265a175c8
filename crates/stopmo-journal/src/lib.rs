//! Commit journal and repository state for stopmo
//!
//! This crate provides:
//! - Commit records and log-derived commit ids
//! - The append-only plain-text commit log
//! - Tracked-file index and user identity storage
//! - The repository handle and the snapshot commit engine
//!
//! All stores are synchronous and single-process. Nothing here takes locks:
//! concurrent invocations against the same repository may interleave their
//! reads and writes.

pub mod engine;
pub mod identity;
pub mod index;
pub mod log;
pub mod record;
pub mod repo;

// Re-exports
pub use engine::{CommitDecision, CommitOutcome};
pub use identity::Identity;
pub use index::FileIndex;
pub use log::CommitLog;
pub use record::{CommitId, CommitRecord};
pub use repo::{Repository, STOPMO_DIR};

pub use stopmo_core::{Error, Result};
