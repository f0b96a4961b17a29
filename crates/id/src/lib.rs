//! Document identifiers and sharded-path utilities.
//!
//! Every record in the trends store is addressed by a [`DocumentId`]. Two shapes are accepted:
//!
//! - **Generated** ids are UUIDv4 in canonical form: 32 lowercase hexadecimal characters, no
//!   hyphens (`550e8400e29b41d4a716446655440000`).
//! - **Supplied** ids come from upstream sources (PubMed ids, trial registry numbers, ...). They
//!   are accepted as long as they are 1 to 128 characters of `[A-Za-z0-9_.-]` and are not `.` or
//!   `..`, so an id is always usable as a file name.
//!
//! ## Sharded layout
//! For an id `i` with SHA-256 hex digest `h`, a document lives at:
//! `parent_dir/<h[0..2]>/<h[2..4]>/<i>.json`
//!
//! Hashing the id rather than slicing it keeps the fan-out even for numeric ids like PubMed's,
//! which would otherwise pile into a handful of shards.

mod service;

pub use service::{DocumentId, MAX_ID_LEN};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid id: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;
