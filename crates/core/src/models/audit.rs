use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Audit fields carried by every record.
///
/// Clients may send these back on update; only `version` is read, as the optimistic
/// concurrency token. Timestamps are always set by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

impl Audit {
    /// Stamps a record that is about to be inserted.
    pub fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_on = Some(now);
        self.updated_on = Some(now);
        self.version = Some(0);
    }

    /// Stamps a record that is about to replace its stored version.
    ///
    /// `updated_on` is strictly greater than the previous value, even if the clock has not
    /// moved (or moved backwards) since the last write.
    pub fn stamp_updated(&mut self, now: DateTime<Utc>) {
        let updated_on = match self.updated_on {
            Some(prev) if now <= prev => prev + Duration::milliseconds(1),
            _ => now,
        };
        self.updated_on = Some(updated_on);
        self.version = Some(self.version.unwrap_or(0) + 1);
    }
}
