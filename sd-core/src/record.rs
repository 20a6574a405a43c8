// SPDX-License-Identifier: AGPL-3.0-or-later
//! Server-shaped records
//!
//! These mirror the JSON returned by the object API. They are validated and
//! mapped into [`crate::FileEntry`] before anything reaches the view.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DriveError, DriveResult};

/// One object as listed by `GET /objects`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    #[serde(default)]
    pub object_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub is_folder: Option<bool>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Fields this client does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ObjectRecord {
    /// Check the fields every entry needs and return the parsed creation time
    pub fn validate(&self) -> DriveResult<DateTime<Utc>> {
        if self.object_id.trim().is_empty() {
            return Err(DriveError::InvalidRecord("missing object_id".into()));
        }
        if self.name.is_empty() {
            return Err(DriveError::InvalidRecord(format!(
                "object {} has no name",
                self.object_id
            )));
        }
        let raw = self.created_at.as_deref().ok_or_else(|| {
            DriveError::InvalidRecord(format!("object {} has no created_at", self.object_id))
        })?;
        parse_timestamp(raw).ok_or_else(|| {
            DriveError::InvalidRecord(format!(
                "object {} has unparseable created_at {:?}",
                self.object_id, raw
            ))
        })
    }
}

/// `GET /objects` response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub items: Vec<ObjectRecord>,
    #[serde(default)]
    pub total: u64,
}

/// `POST /objects` response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedObject {
    pub object_id: String,
    pub name: String,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub sha256: Option<String>,
    #[serde(default)]
    pub object_key: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `DELETE /objects/{id}` response body, passed through as-is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeleteConfirmation(pub Value);

/// Parse an RFC 3339 timestamp, or a naive ISO-8601 one taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
