//! Filesystem-backed document store.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//!   <collection>/
//!     <s1>/
//!       <s2>/
//!         <id>.json     # StoredDocument envelope
//! ```
//!
//! where `s1` and `s2` come from the SHA-256 of the id (see [`DocumentId::sharded_path`]).
//!
//! Writes go to `<id>.json.tmp` and are renamed into place, so readers never observe a
//! half-written document. All writers in the process share one lock, which also guards the
//! per-collection keyword indexes. Indexes are built from disk the first time a collection is
//! touched.

use super::{DocumentStore, KeywordIndex, StoredDocument};
use crate::constants::TEMP_FILE_SUFFIX;
use crate::{CoreError, CoreResult};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use trends_id::DocumentId;

/// A [`DocumentStore`] keeping one JSON file per document.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    indexes: Mutex<HashMap<String, KeywordIndex>>,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StorageDirCreation`] if `root` cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> CoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(CoreError::StorageDirCreation)?;

        Ok(Self {
            root,
            indexes: Mutex::new(HashMap::new()),
        })
    }

    fn collection_dir(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }

    fn document_path(&self, collection: &str, id: &DocumentId) -> PathBuf {
        id.sharded_path(&self.collection_dir(collection))
    }

    fn lock_indexes(&self) -> CoreResult<MutexGuard<'_, HashMap<String, KeywordIndex>>> {
        self.indexes.lock().map_err(|_| CoreError::LockPoisoned)
    }

    /// Returns the index for `collection`, scanning the collection directory if this is the
    /// first time it is needed.
    fn index_for<'a>(
        &self,
        indexes: &'a mut HashMap<String, KeywordIndex>,
        collection: &str,
    ) -> CoreResult<&'a mut KeywordIndex> {
        match indexes.entry(collection.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let mut index = KeywordIndex::new();
                let docs = scan_collection(&self.collection_dir(collection))?;
                for doc in &docs {
                    index.insert(&doc.id, &doc.keywords);
                }
                tracing::debug!(
                    "built keyword index for '{}' from {} documents",
                    collection,
                    docs.len()
                );
                Ok(entry.insert(index))
            }
        }
    }
}

impl DocumentStore for FileStore {
    fn get(&self, collection: &str, id: &DocumentId) -> CoreResult<Option<StoredDocument>> {
        read_document(&self.document_path(collection, id))
    }

    fn list(&self, collection: &str) -> CoreResult<Vec<StoredDocument>> {
        scan_collection(&self.collection_dir(collection))
    }

    fn find_by_keyword(&self, collection: &str, keyword: &str) -> CoreResult<Vec<StoredDocument>> {
        let ids = {
            let mut indexes = self.lock_indexes()?;
            self.index_for(&mut indexes, collection)?.lookup(keyword)
        };

        let mut docs = Vec::with_capacity(ids.len());
        for id in ids {
            // A concurrent replace may have moved the document off this keyword since the
            // lookup; re-check against what is on disk now.
            if let Some(doc) = self.get(collection, &id)? {
                if doc.keywords.contains(keyword) {
                    docs.push(doc);
                }
            }
        }
        Ok(docs)
    }

    fn insert(&self, collection: &str, doc: StoredDocument) -> CoreResult<()> {
        let mut indexes = self.lock_indexes()?;
        let index = self.index_for(&mut indexes, collection)?;

        let path = self.document_path(collection, &doc.id);
        if path.exists() {
            return Err(CoreError::DuplicateId {
                collection: collection.to_string(),
                id: doc.id.to_string(),
            });
        }

        write_document(&path, &doc)?;
        index.insert(&doc.id, &doc.keywords);
        Ok(())
    }

    fn replace(
        &self,
        collection: &str,
        doc: StoredDocument,
        expected_version: u32,
    ) -> CoreResult<()> {
        let mut indexes = self.lock_indexes()?;
        let index = self.index_for(&mut indexes, collection)?;

        let path = self.document_path(collection, &doc.id);
        let current = read_document(&path)?.ok_or_else(|| CoreError::NotFound {
            collection: collection.to_string(),
            id: doc.id.to_string(),
        })?;

        if current.version != expected_version {
            return Err(CoreError::VersionConflict {
                collection: collection.to_string(),
                id: doc.id.to_string(),
                expected: expected_version,
                actual: current.version,
            });
        }

        write_document(&path, &doc)?;
        index.update(&doc.id, &current.keywords, &doc.keywords);
        Ok(())
    }
}

/// Reads one document; `Ok(None)` if the file does not exist.
fn read_document(path: &Path) -> CoreResult<Option<StoredDocument>> {
    let contents = match fs::read(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(CoreError::FileRead(e)),
    };

    serde_json::from_slice(&contents)
        .map(Some)
        .map_err(CoreError::Deserialization)
}

fn write_document(path: &Path, doc: &StoredDocument) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(CoreError::StorageDirCreation)?;
    }

    let contents = serde_json::to_vec_pretty(doc).map_err(CoreError::Serialization)?;

    let mut tmp_name: OsString = path.as_os_str().to_owned();
    tmp_name.push(".");
    tmp_name.push(TEMP_FILE_SUFFIX);
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, contents).map_err(CoreError::FileWrite)?;
    fs::rename(&tmp_path, path).map_err(CoreError::FileWrite)
}

/// Reads every document under `<collection_dir>/<s1>/<s2>/`, ordered by id.
///
/// Files that are not documents (leftover temp files, strays) are skipped, and documents that
/// fail to parse are logged and skipped rather than failing the whole listing.
fn scan_collection(collection_dir: &Path) -> CoreResult<Vec<StoredDocument>> {
    let mut docs = Vec::new();

    let s1_iter = match fs::read_dir(collection_dir) {
        Ok(it) => it,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(docs),
        Err(e) => return Err(CoreError::FileRead(e)),
    };

    for s1 in s1_iter.flatten() {
        let s1_path = s1.path();
        if !s1_path.is_dir() {
            continue;
        }

        let s2_iter = match fs::read_dir(&s1_path) {
            Ok(it) => it,
            Err(_) => continue,
        };

        for s2 in s2_iter.flatten() {
            let s2_path = s2.path();
            if !s2_path.is_dir() {
                continue;
            }

            let doc_iter = match fs::read_dir(&s2_path) {
                Ok(it) => it,
                Err(_) => continue,
            };

            for entry in doc_iter.flatten() {
                let doc_path = entry.path();
                if !doc_path.is_file() || DocumentId::from_document_path(&doc_path).is_none() {
                    continue;
                }

                match read_document(&doc_path) {
                    Ok(Some(doc)) => docs.push(doc),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("skipping unreadable document {}: {}", doc_path.display(), e);
                    }
                }
            }
        }
    }

    docs.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(docs)
}
