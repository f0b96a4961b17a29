//! # API REST
//!
//! REST API implementation for the Trends store.
//!
//! Handles:
//! - HTTP endpoints with axum, one route set per record type under `/v1/api`
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON errors, Basic auth, CORS, request tracing)
//!
//! Uses `api-shared` for common types and `trends-core` for all data operations.

#![warn(rust_2018_idioms)]

pub mod auth;
pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;

pub use config::{ServerConfig, ServerConfigError};
pub use error::ApiError;

use api_shared::Credentials;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use trends_core::models::{ClinicalTrial, Disease, Gene, Patent, Publication, Trend};
use trends_core::DocumentStore;
use utoipa_swagger_ui::SwaggerUi;

/// Application state for the REST API server
///
/// Holds the shared store every entity service is built on, and the credentials guarding the
/// data routes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub credentials: Option<Arc<Credentials>>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, credentials: Option<Credentials>) -> Self {
        if credentials.is_none() {
            tracing::warn!("no API credentials configured; /v1/api is open to everyone");
        }
        Self {
            store,
            credentials: credentials.map(Arc::new),
        }
    }
}

/// Builds the complete router: health, docs and the authenticated data API.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(handlers::entity_routes::<Disease>())
        .merge(handlers::entity_routes::<Gene>())
        .merge(handlers::entity_routes::<Patent>())
        .merge(handlers::entity_routes::<Publication>())
        .merge(handlers::entity_routes::<ClinicalTrial>())
        .merge(handlers::entity_routes::<Trend>())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .nest(docs::API_PREFIX, api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
