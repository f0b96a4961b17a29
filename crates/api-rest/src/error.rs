use api_shared::ErrorRes;
use axum::extract::rejection::JsonRejection;
use axum::extract::OriginalUri;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use trends_core::CoreError;

/// A failed request, rendered as an [`ErrorRes`] body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    path: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn from_core(err: CoreError, uri: &OriginalUri) -> Self {
        let status = status_for(&err);
        let message = if status.is_server_error() {
            tracing::error!("{} failed: {:?}", uri.path(), err);
            "Internal error".to_string()
        } else {
            err.to_string()
        };
        Self::new(status, message, uri.path())
    }

    /// Body errors are client errors: unparsable JSON and JSON that does not fit the record
    /// (wrong types, invalid ids) both give 400. Other rejections keep their own status.
    pub fn from_rejection(rejection: JsonRejection, uri: &OriginalUri) -> Self {
        let status = match &rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                StatusCode::BAD_REQUEST
            }
            other => other.status(),
        };
        Self::new(status, rejection.body_text(), uri.path())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Maps a core error onto an HTTP status.
pub fn status_for(err: &CoreError) -> StatusCode {
    match err {
        CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        CoreError::Validation(_) | CoreError::InvalidId(_) => StatusCode::BAD_REQUEST,
        CoreError::DuplicateId { .. } | CoreError::VersionConflict { .. } => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorRes::new(self.message, &self.path))).into_response()
    }
}
