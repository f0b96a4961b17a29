//! Business rules shared by every entity.
//!
//! The service owns identity and audit fields: ids are assigned on save when the payload has
//! none, timestamps are always stamped here, and `version` is only ever read from a payload as
//! the optimistic concurrency token for an update.

use crate::entity::Entity;
use crate::repository::Repository;
use crate::store::DocumentStore;
use crate::{CoreError, CoreResult};
use chrono::Utc;
use std::sync::Arc;
use trends_id::DocumentId;

/// CRUD operations for one entity type.
pub struct EntityService<E> {
    repo: Repository<E>,
}

impl<E> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<E: Entity> EntityService<E> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repo: Repository::new(store),
        }
    }

    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no record has this id.
    pub fn find_by_id(&self, id: &DocumentId) -> CoreResult<E> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| not_found::<E>(id))
    }

    /// Records whose keyword set contains `keyword`. Empty when nothing matches.
    pub fn find_by_keyword(&self, keyword: &str) -> CoreResult<Vec<E>> {
        self.repo.find_by_keyword(keyword)
    }

    pub fn find_all(&self) -> CoreResult<Vec<E>> {
        self.repo.find_all()
    }

    /// Validates and inserts a new record.
    ///
    /// An id is generated when the payload has none. Audit fields sent by the client are
    /// overwritten: `createdOn` and `updatedOn` are set to now and `version` starts at 0.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Validation`] if a required field is blank.
    /// - [`CoreError::DuplicateId`] if the supplied id is already taken.
    pub fn save(&self, entity: E) -> CoreResult<E> {
        entity.validate()?;
        let saved = self.repo.insert(prepare_new(entity))?;
        tracing::debug!(
            "saved {} {}",
            E::SINGULAR,
            saved.id().map(DocumentId::as_str).unwrap_or_default()
        );
        Ok(saved)
    }

    /// Validates every payload, then inserts them in order.
    ///
    /// Nothing is written if any payload fails validation. A store error (for example a
    /// duplicate id) stops the batch; records inserted before it are kept.
    pub fn save_all(&self, entities: Vec<E>) -> CoreResult<Vec<E>> {
        for (position, entity) in entities.iter().enumerate() {
            entity.validate().map_err(|e| match e {
                CoreError::Validation(msg) => {
                    CoreError::Validation(format!("item {position}: {msg}"))
                }
                other => other,
            })?;
        }

        let count = entities.len();
        let saved = self
            .repo
            .insert_many(entities.into_iter().map(prepare_new).collect())?;
        tracing::debug!("saved {} {}", count, E::PLURAL);
        Ok(saved)
    }

    /// Replaces the descriptive fields of record `id` with those of `payload`.
    ///
    /// If `payload` carries a `version`, it must match the stored version. `id` and `createdOn`
    /// are kept, `updatedOn` moves forward and `version` is incremented. The write is
    /// conditional on the stored version not having changed since it was read.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if no record has this id.
    /// - [`CoreError::VersionConflict`] if the payload or a concurrent writer is stale.
    /// - [`CoreError::Validation`] if a required field is blank.
    pub fn update(&self, id: &DocumentId, payload: E) -> CoreResult<E> {
        let mut existing = self.find_by_id(id)?;
        let stored_version = existing.audit().version.unwrap_or(0);

        if let Some(expected) = payload.audit().version {
            if expected != stored_version {
                return Err(CoreError::VersionConflict {
                    collection: E::COLLECTION.to_string(),
                    id: id.to_string(),
                    expected,
                    actual: stored_version,
                });
            }
        }

        payload.validate()?;
        existing.merge_from(payload);
        existing.audit_mut().stamp_updated(Utc::now());

        let updated = self.repo.replace(existing, stored_version)?;
        tracing::debug!("updated {} {}", E::SINGULAR, id);
        Ok(updated)
    }
}

fn prepare_new<E: Entity>(mut entity: E) -> E {
    if entity.id().is_none() {
        entity.set_id(DocumentId::generate());
    }
    entity.audit_mut().stamp_created(Utc::now());
    entity
}

fn not_found<E: Entity>(id: &DocumentId) -> CoreError {
    CoreError::NotFound {
        collection: E::SINGULAR.to_string(),
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Audit, ClinicalTrial, Disease, Gene, Publication, Trend, TrialStatus};
    use crate::store::{FileStore, MemoryStore};
    use std::collections::BTreeSet;
    use std::sync::Barrier;
    use std::thread;
    use tempfile::TempDir;

    fn keywords(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn memory_service<E: Entity>() -> EntityService<E> {
        EntityService::new(Arc::new(MemoryStore::new()))
    }

    fn test_gene(name: &str, kws: &[&str]) -> Gene {
        Gene {
            approved_gene_name: name.into(),
            approved_symbols: keywords(&[name]),
            keywords: keywords(kws),
            chromosomal_location: Some("17q21.31".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_save_then_find_by_id_returns_same_record() {
        let service = memory_service::<Gene>();

        let saved = service.save(test_gene("BRCA1", &["cancer"])).unwrap();
        let id = saved.id.clone().expect("save should assign an id");
        assert!(id.is_canonical_uuid());
        assert_eq!(saved.audit.version, Some(0));
        assert!(saved.audit.created_on.is_some());
        assert_eq!(saved.audit.created_on, saved.audit.updated_on);

        let found = service.find_by_id(&id).unwrap();
        assert_eq!(found, saved);
    }

    #[test]
    fn test_save_keeps_supplied_id_and_ignores_client_audit() {
        let service = memory_service::<Publication>();
        let publication = Publication {
            id: Some(DocumentId::parse("31452104").unwrap()),
            abstract_title: "A study".into(),
            abstract_content: "Findings.".into(),
            audit: Audit {
                version: Some(42),
                ..Default::default()
            },
            ..Default::default()
        };

        let saved = service.save(publication).unwrap();

        assert_eq!(saved.id.as_ref().unwrap().as_str(), "31452104");
        assert_eq!(saved.audit.version, Some(0));
    }

    #[test]
    fn test_save_rejects_duplicate_id() {
        let service = memory_service::<Disease>();
        let disease = Disease {
            id: Some(DocumentId::parse("asthma").unwrap()),
            disease_name: "Asthma".into(),
            ..Default::default()
        };
        service.save(disease.clone()).unwrap();

        let err = service.save(disease).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId { .. }));
    }

    #[test]
    fn test_save_rejects_blank_required_field() {
        let service = memory_service::<ClinicalTrial>();

        let err = service
            .save(ClinicalTrial {
                pub_med_id: " ".into(),
                status: Some(TrialStatus::InProgress),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert!(service.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_find_by_keyword_returns_all_and_only_matches() {
        let service = memory_service::<Gene>();
        let a = service.save(test_gene("BRCA1", &["cancer", "dna repair"])).unwrap();
        let b = service.save(test_gene("TP53", &["cancer"])).unwrap();
        service.save(test_gene("CFTR", &["cystic fibrosis"])).unwrap();

        let mut hits: Vec<_> = service
            .find_by_keyword("cancer")
            .unwrap()
            .into_iter()
            .map(|g| g.id.unwrap())
            .collect();
        hits.sort();
        let mut expected = vec![a.id.unwrap(), b.id.unwrap()];
        expected.sort();

        assert_eq!(hits, expected);
        assert!(service.find_by_keyword("Cancer").unwrap().is_empty());
        assert!(service.find_by_keyword("unknown").unwrap().is_empty());
    }

    #[test]
    fn test_find_all_returns_every_record() {
        let service = memory_service::<Trend>();
        for i in 0..5 {
            service
                .save(Trend {
                    keywords: keywords(&["BRCA1"]),
                    total_associations: i,
                    ..Default::default()
                })
                .unwrap();
        }

        assert_eq!(service.find_all().unwrap().len(), 5);
    }

    #[test]
    fn test_save_all_validates_before_writing() {
        let service = memory_service::<Gene>();

        let err = service
            .save_all(vec![test_gene("BRCA1", &[]), test_gene("", &[])])
            .unwrap_err();

        match err {
            CoreError::Validation(msg) => assert!(msg.starts_with("item 1:")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(service.find_all().unwrap().is_empty());

        let saved = service
            .save_all(vec![test_gene("BRCA1", &[]), test_gene("TP53", &[])])
            .unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(service.find_all().unwrap().len(), 2);
    }

    #[test]
    fn test_update_persists_fields_and_advances_audit() {
        let service = memory_service::<Gene>();
        let saved = service.save(test_gene("BRCA1", &["cancer"])).unwrap();
        let id = saved.id.clone().unwrap();

        let mut payload = test_gene("BRCA1 DNA repair associated", &["breast cancer"]);
        payload.gene_group = Some("Ring finger proteins".into());
        let updated = service.update(&id, payload).unwrap();

        assert_eq!(updated.id, Some(id.clone()));
        assert_eq!(updated.approved_gene_name, "BRCA1 DNA repair associated");
        assert_eq!(updated.audit.created_on, saved.audit.created_on);
        assert!(updated.audit.updated_on > saved.audit.updated_on);
        assert_eq!(updated.audit.version, Some(1));

        let found = service.find_by_id(&id).unwrap();
        assert_eq!(found, updated);
        assert!(service.find_by_keyword("cancer").unwrap().is_empty());
        assert_eq!(service.find_by_keyword("breast cancer").unwrap().len(), 1);
    }

    #[test]
    fn test_update_rejects_stale_version() {
        let service = memory_service::<Disease>();
        let saved = service
            .save(Disease {
                disease_name: "Asthma".into(),
                ..Default::default()
            })
            .unwrap();
        let id = saved.id.clone().unwrap();

        // First writer read version 0 and wins.
        let mut first = saved.clone();
        first.active = true;
        service.update(&id, first).unwrap();

        // Second writer also read version 0.
        let mut second = saved.clone();
        second.disease_name = "Bronchial asthma".into();
        let err = service.update(&id, second).unwrap_err();

        assert!(matches!(
            err,
            CoreError::VersionConflict {
                expected: 0,
                actual: 1,
                ..
            }
        ));
        let stored = service.find_by_id(&id).unwrap();
        assert_eq!(stored.disease_name, "Asthma");
        assert!(stored.active);
    }

    #[test]
    fn test_update_missing_record_is_not_found() {
        let service = memory_service::<Disease>();
        let id = DocumentId::generate();

        let err = service
            .update(
                &id,
                Disease {
                    disease_name: "Asthma".into(),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, CoreError::NotFound { .. }));
        assert_eq!(err.to_string(), format!("disease id {id} not found"));
    }

    #[test]
    fn test_concurrent_updates_from_same_version_have_one_winner() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(FileStore::open(temp_dir.path()).unwrap());
        let service = EntityService::<Disease>::new(store);
        let saved = service
            .save(Disease {
                disease_name: "Asthma".into(),
                ..Default::default()
            })
            .unwrap();
        let id = saved.id.clone().unwrap();

        let writers = 16;
        let barrier = Barrier::new(writers);
        let results: Vec<CoreResult<Disease>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..writers)
                .map(|i| {
                    let mut payload = saved.clone();
                    payload.disease_name = format!("Asthma variant {i}");
                    let (service, barrier, id) = (&service, &barrier, &id);
                    scope.spawn(move || {
                        barrier.wait();
                        service.update(id, payload)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let winners: Vec<&Disease> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1);
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(
                matches!(err, CoreError::VersionConflict { .. }),
                "unexpected error: {err:?}"
            );
        }

        let stored = service.find_by_id(&id).unwrap();
        assert_eq!(stored.audit.version, Some(1));
        assert_eq!(stored.disease_name, winners[0].disease_name);
    }

    #[test]
    fn test_file_store_round_trip_survives_reopen() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let saved = {
            let store = Arc::new(FileStore::open(temp_dir.path()).unwrap());
            let service = EntityService::<Gene>::new(store);
            let saved = service.save(test_gene("BRCA1", &["cancer"])).unwrap();
            service
                .update(saved.id.as_ref().unwrap(), test_gene("BRCA1", &["ovarian cancer"]))
                .unwrap()
        };

        let store = Arc::new(FileStore::open(temp_dir.path()).unwrap());
        let service = EntityService::<Gene>::new(store);
        let id = saved.id.clone().unwrap();

        assert_eq!(service.find_by_id(&id).unwrap(), saved);
        assert_eq!(service.find_by_keyword("ovarian cancer").unwrap(), vec![saved]);
        assert!(service.find_by_keyword("cancer").unwrap().is_empty());
    }
}
