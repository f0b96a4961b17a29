//! Document storage.
//!
//! A [`DocumentStore`] knows nothing about entity types. It keeps [`StoredDocument`] envelopes
//! per collection: the id, the optimistic version, the keyword set that feeds the
//! [`KeywordIndex`], and the record body as JSON.
//!
//! Two backends are provided:
//!
//! - [`FileStore`]: one JSON file per document in a sharded directory tree, durable across
//!   restarts.
//! - [`MemoryStore`]: process-local maps, for tests and throwaway instances.

mod file;
mod index;
mod memory;

pub use file::FileStore;
pub use index::KeywordIndex;
pub use memory::MemoryStore;

use crate::CoreResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use trends_id::DocumentId;

/// The unit a [`DocumentStore`] reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub version: u32,
    pub keywords: BTreeSet<String>,
    pub body: serde_json::Value,
}

/// Persistence primitives shared by every collection.
///
/// Implementations must make [`insert`](DocumentStore::insert) and
/// [`replace`](DocumentStore::replace) atomic with respect to each other: the existence and
/// version checks and the write happen under one critical section.
pub trait DocumentStore: Send + Sync {
    fn get(&self, collection: &str, id: &DocumentId) -> CoreResult<Option<StoredDocument>>;

    /// Every readable document in the collection, ordered by id.
    ///
    /// A document that exists but cannot be decoded is logged and left out here and in
    /// [`find_by_keyword`](DocumentStore::find_by_keyword), so one bad file does not hide the
    /// rest of the collection. [`get`](DocumentStore::get) on that id still fails with
    /// [`CoreError::Deserialization`](crate::CoreError::Deserialization).
    fn list(&self, collection: &str) -> CoreResult<Vec<StoredDocument>>;

    /// Documents whose keyword set contains `keyword` exactly, ordered by id.
    fn find_by_keyword(&self, collection: &str, keyword: &str) -> CoreResult<Vec<StoredDocument>>;

    /// Writes a new document.
    ///
    /// # Errors
    ///
    /// [`CoreError::DuplicateId`](crate::CoreError::DuplicateId) if the id is already taken.
    fn insert(&self, collection: &str, doc: StoredDocument) -> CoreResult<()>;

    /// Overwrites an existing document if its stored version is still `expected_version`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`](crate::CoreError::NotFound) if there is nothing to replace.
    /// - [`CoreError::VersionConflict`](crate::CoreError::VersionConflict) if another writer got
    ///   there first.
    fn replace(
        &self,
        collection: &str,
        doc: StoredDocument,
        expected_version: u32,
    ) -> CoreResult<()>;
}
