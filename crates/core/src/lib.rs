//! # Trends Core
//!
//! Core business logic for the biomedical trends store.
//!
//! This crate contains the record models and pure data operations:
//! - Disease, gene, patent, publication, clinical trial and trend records
//! - Create, list, keyword search and versioned update through [`EntityService`]
//! - Sharded JSON storage under a configurable data directory, or an in-memory store
//!
//! **No API concerns**: authentication, HTTP routing and request parsing belong in `api-rest`
//! or `api-shared`.

pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod store;

pub use config::{CoreConfig, StoreKind};
pub use entity::Entity;
pub use error::{CoreError, CoreResult};
pub use repository::Repository;
pub use service::EntityService;
pub use store::{DocumentStore, FileStore, MemoryStore, StoredDocument};
pub use trends_id::DocumentId;
pub use trends_types::NonEmptyText;
