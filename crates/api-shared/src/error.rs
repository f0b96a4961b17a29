use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned with every non-2xx response from the data API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    /// `uri=<request path>`
    pub details: String,
}

impl ErrorRes {
    pub fn new(message: impl Into<String>, path: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
            details: format!("uri={path}"),
        }
    }
}
