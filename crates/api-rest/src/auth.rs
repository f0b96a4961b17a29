//! HTTP Basic guard for the data API.

use crate::error::ApiError;
use crate::AppState;
use api_shared::validate_basic_auth;
use axum::extract::{OriginalUri, Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Rejects requests without the configured credentials. Passes everything through when no
/// credentials are configured.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.credentials.as_deref() else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match validate_basic_auth(provided, expected) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            let path = request
                .extensions()
                .get::<OriginalUri>()
                .map(|uri| uri.path().to_string())
                .unwrap_or_else(|| request.uri().path().to_string());
            tracing::warn!("rejected request to {}: {}", path, e);

            let mut response =
                ApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized", path).into_response();
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"trends\""),
            );
            response
        }
    }
}
