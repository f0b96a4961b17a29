//! HTTP handlers.
//!
//! The entity handlers are generic and instantiated once per record type by
//! [`entity_routes`]. Store calls are synchronous and run directly on the request task.

use crate::error::ApiError;
use crate::AppState;
use api_shared::{HealthRes, HealthService};
use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post, put};
use axum::Router;
use trends_core::{DocumentId, Entity, EntityService};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Open to unauthenticated callers so load balancers can probe it.
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

/// Routes for one entity type, relative to the API prefix.
///
/// Lookups and updates answer on both the plural and singular forms, e.g. `/genes/id/:id` and
/// `/gene/id/:id`.
pub fn entity_routes<E: Entity>() -> Router<AppState> {
    let singular = E::SINGULAR;
    let plural = E::PLURAL;

    Router::new()
        .route(
            &format!("/{plural}"),
            get(find_all::<E>).post(add_many::<E>),
        )
        .route(
            &format!("/{plural}/keyword/:keyword"),
            get(find_by_keyword::<E>),
        )
        .route(&format!("/{plural}/id/:id"), get(find_by_id::<E>))
        .route(&format!("/{singular}/id/:id"), get(find_by_id::<E>))
        .route(&format!("/{singular}/add"), post(add::<E>))
        .route(&format!("/{plural}/update/:id"), put(update::<E>))
        .route(&format!("/{singular}/update/:id"), put(update::<E>))
}

fn service<E: Entity>(state: &AppState) -> EntityService<E> {
    EntityService::new(state.store.clone())
}

fn parse_id(id: &str, uri: &OriginalUri) -> Result<DocumentId, ApiError> {
    DocumentId::parse(id).map_err(|e| ApiError::from_core(e.into(), uri))
}

async fn find_all<E: Entity>(
    State(state): State<AppState>,
    uri: OriginalUri,
) -> Result<Json<Vec<E>>, ApiError> {
    let records = service::<E>(&state)
        .find_all()
        .map_err(|e| ApiError::from_core(e, &uri))?;
    Ok(Json(records))
}

async fn find_by_keyword<E: Entity>(
    State(state): State<AppState>,
    uri: OriginalUri,
    Path(keyword): Path<String>,
) -> Result<Json<Vec<E>>, ApiError> {
    let records = service::<E>(&state)
        .find_by_keyword(&keyword)
        .map_err(|e| ApiError::from_core(e, &uri))?;
    Ok(Json(records))
}

async fn find_by_id<E: Entity>(
    State(state): State<AppState>,
    uri: OriginalUri,
    Path(id): Path<String>,
) -> Result<Json<E>, ApiError> {
    let id = parse_id(&id, &uri)?;
    let record = service::<E>(&state)
        .find_by_id(&id)
        .map_err(|e| ApiError::from_core(e, &uri))?;
    Ok(Json(record))
}

async fn add<E: Entity>(
    State(state): State<AppState>,
    uri: OriginalUri,
    payload: Result<Json<E>, JsonRejection>,
) -> Result<(StatusCode, Json<E>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::from_rejection(e, &uri))?;
    let saved = service::<E>(&state)
        .save(payload)
        .map_err(|e| ApiError::from_core(e, &uri))?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn add_many<E: Entity>(
    State(state): State<AppState>,
    uri: OriginalUri,
    payload: Result<Json<Vec<E>>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<E>>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::from_rejection(e, &uri))?;
    let saved = service::<E>(&state)
        .save_all(payload)
        .map_err(|e| ApiError::from_core(e, &uri))?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update<E: Entity>(
    State(state): State<AppState>,
    uri: OriginalUri,
    Path(id): Path<String>,
    payload: Result<Json<E>, JsonRejection>,
) -> Result<Json<E>, ApiError> {
    let id = parse_id(&id, &uri)?;
    let Json(payload) = payload.map_err(|e| ApiError::from_rejection(e, &uri))?;
    let updated = service::<E>(&state)
        .update(&id, payload)
        .map_err(|e| ApiError::from_core(e, &uri))?;
    Ok(Json(updated))
}
