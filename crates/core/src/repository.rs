//! Typed access to one collection.

use crate::entity::Entity;
use crate::store::{DocumentStore, StoredDocument};
use crate::{CoreError, CoreResult};
use std::marker::PhantomData;
use std::sync::Arc;
use trends_id::DocumentId;

/// Converts between `E` and [`StoredDocument`] and forwards to the store.
pub struct Repository<E> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn find_by_id(&self, id: &DocumentId) -> CoreResult<Option<E>> {
        self.store
            .get(E::COLLECTION, id)?
            .map(from_stored)
            .transpose()
    }

    pub fn find_by_keyword(&self, keyword: &str) -> CoreResult<Vec<E>> {
        self.store
            .find_by_keyword(E::COLLECTION, keyword)?
            .into_iter()
            .map(from_stored)
            .collect()
    }

    pub fn find_all(&self) -> CoreResult<Vec<E>> {
        self.store
            .list(E::COLLECTION)?
            .into_iter()
            .map(from_stored)
            .collect()
    }

    /// Inserts `entity`, which must already carry its id.
    pub fn insert(&self, entity: E) -> CoreResult<E> {
        self.store.insert(E::COLLECTION, to_stored(&entity)?)?;
        Ok(entity)
    }

    /// Inserts in order, stopping at the first failure. Earlier inserts are kept.
    pub fn insert_many(&self, entities: Vec<E>) -> CoreResult<Vec<E>> {
        entities
            .into_iter()
            .map(|entity| self.insert(entity))
            .collect()
    }

    /// Replaces the stored record if it is still at `expected_version`.
    pub fn replace(&self, entity: E, expected_version: u32) -> CoreResult<E> {
        self.store
            .replace(E::COLLECTION, to_stored(&entity)?, expected_version)?;
        Ok(entity)
    }
}

fn to_stored<E: Entity>(entity: &E) -> CoreResult<StoredDocument> {
    let id = entity.id().cloned().ok_or(CoreError::MissingId)?;
    let body = serde_json::to_value(entity).map_err(CoreError::Serialization)?;

    Ok(StoredDocument {
        id,
        version: entity.audit().version.unwrap_or(0),
        keywords: entity.keywords().clone(),
        body,
    })
}

fn from_stored<E: Entity>(doc: StoredDocument) -> CoreResult<E> {
    serde_json::from_value(doc.body).map_err(CoreError::Deserialization)
}
