use super::{DocumentStore, KeywordIndex, StoredDocument};
use crate::{CoreError, CoreResult};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use trends_id::DocumentId;

#[derive(Debug, Default)]
struct Collection {
    docs: BTreeMap<DocumentId, StoredDocument>,
    index: KeywordIndex,
}

/// A [`DocumentStore`] backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, collection: &str, id: &DocumentId) -> CoreResult<Option<StoredDocument>> {
        let collections = self.collections.read().map_err(|_| CoreError::LockPoisoned)?;
        Ok(collections
            .get(collection)
            .and_then(|c| c.docs.get(id))
            .cloned())
    }

    fn list(&self, collection: &str) -> CoreResult<Vec<StoredDocument>> {
        let collections = self.collections.read().map_err(|_| CoreError::LockPoisoned)?;
        Ok(collections
            .get(collection)
            .map(|c| c.docs.values().cloned().collect())
            .unwrap_or_default())
    }

    fn find_by_keyword(&self, collection: &str, keyword: &str) -> CoreResult<Vec<StoredDocument>> {
        let collections = self.collections.read().map_err(|_| CoreError::LockPoisoned)?;
        let Some(c) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(c.index
            .lookup(keyword)
            .iter()
            .filter_map(|id| c.docs.get(id).cloned())
            .collect())
    }

    fn insert(&self, collection: &str, doc: StoredDocument) -> CoreResult<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| CoreError::LockPoisoned)?;
        let c = collections.entry(collection.to_string()).or_default();

        if c.docs.contains_key(&doc.id) {
            return Err(CoreError::DuplicateId {
                collection: collection.to_string(),
                id: doc.id.to_string(),
            });
        }

        c.index.insert(&doc.id, &doc.keywords);
        c.docs.insert(doc.id.clone(), doc);
        Ok(())
    }

    fn replace(
        &self,
        collection: &str,
        doc: StoredDocument,
        expected_version: u32,
    ) -> CoreResult<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| CoreError::LockPoisoned)?;
        let not_found = || CoreError::NotFound {
            collection: collection.to_string(),
            id: doc.id.to_string(),
        };
        let c = collections.get_mut(collection).ok_or_else(not_found)?;
        let current = c.docs.get(&doc.id).ok_or_else(not_found)?;

        if current.version != expected_version {
            return Err(CoreError::VersionConflict {
                collection: collection.to_string(),
                id: doc.id.to_string(),
                expected: expected_version,
                actual: current.version,
            });
        }

        c.index.update(&doc.id, &current.keywords, &doc.keywords);
        c.docs.insert(doc.id.clone(), doc);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, version: u32, keywords: &[&str]) -> StoredDocument {
        StoredDocument {
            id: DocumentId::parse(id).unwrap(),
            version,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            body: json!({ "id": id }),
        }
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let store = MemoryStore::new();
        store.insert("gene", doc("g1", 0, &[])).unwrap();

        let err = store.insert("gene", doc("g1", 0, &[])).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId { .. }));

        // Same id in another collection is fine.
        store.insert("disease", doc("g1", 0, &[])).unwrap();
    }

    #[test]
    fn test_replace_checks_version() {
        let store = MemoryStore::new();
        store.insert("gene", doc("g1", 0, &["old"])).unwrap();

        store.replace("gene", doc("g1", 1, &["new"]), 0).unwrap();

        let err = store
            .replace("gene", doc("g1", 1, &["stale"]), 0)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::VersionConflict {
                expected: 0,
                actual: 1,
                ..
            }
        ));

        assert!(store.find_by_keyword("gene", "old").unwrap().is_empty());
        assert_eq!(store.find_by_keyword("gene", "new").unwrap().len(), 1);
        assert!(store.find_by_keyword("gene", "stale").unwrap().is_empty());
    }

    #[test]
    fn test_replace_missing_document_is_not_found() {
        let store = MemoryStore::new();
        let err = store.replace("gene", doc("nope", 1, &[]), 0).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }
}
