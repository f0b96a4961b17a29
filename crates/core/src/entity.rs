//! The trait every stored record implements.
//!
//! Disease, gene, patent, publication, trial and trend records differ only in their fields. All
//! storage, service and HTTP code is written once against [`Entity`] and instantiated per type.

use crate::models::Audit;
use crate::{CoreError, CoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use trends_id::DocumentId;
use trends_types::NonEmptyText;

pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Store collection (and data directory) name.
    const COLLECTION: &'static str;
    /// Route segment for single-record operations, e.g. `/gene/add`.
    const SINGULAR: &'static str;
    /// Route segment for collection operations, e.g. `/genes`.
    const PLURAL: &'static str;
    /// Name of the OpenAPI component schema.
    const SCHEMA: &'static str;

    fn id(&self) -> Option<&DocumentId>;

    fn set_id(&mut self, id: DocumentId);

    fn audit(&self) -> &Audit;

    fn audit_mut(&mut self) -> &mut Audit;

    /// The indexed keyword set.
    fn keywords(&self) -> &BTreeSet<String>;

    /// Checks required fields. Records with nothing required keep the default.
    fn validate(&self) -> CoreResult<()> {
        Ok(())
    }

    /// Copies every descriptive field of `payload` into `self`.
    ///
    /// Identity and audit fields (`id`, `createdOn`, `updatedOn`, `version`) are left alone;
    /// the service owns those.
    fn merge_from(&mut self, payload: Self);
}

/// Fails with [`CoreError::Validation`] when `value` is blank.
pub(crate) fn require(field: &str, value: &str) -> CoreResult<()> {
    NonEmptyText::new(value)
        .map(|_| ())
        .map_err(|_| CoreError::Validation(format!("{field} must not be blank")))
}
