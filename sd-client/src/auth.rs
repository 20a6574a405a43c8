// SPDX-License-Identifier: AGPL-3.0-or-later
//! Account registration
//!
//! Unlike the object endpoints, a failed registration carries a
//! human-readable `detail` from the server that is shown to the user as-is.

use reqwest::Client;
use sd_core::{DriveConfig, DriveError, DriveResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::transport_error;

const FAILURE: &str = "Registration failed";

#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The created account as echoed back by the server
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredUser {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
    http: Client,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &DriveConfig) -> Self {
        Self::new(config.api.base_url.clone())
    }

    pub async fn register(&self, request: &RegisterRequest) -> DriveResult<RegisteredUser> {
        tracing::debug!(email = %request.email, "POST /auth/register");

        let response = self
            .http
            .post(format!("{}/auth/register", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(FAILURE, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = detail_message(&body).unwrap_or_else(|| FAILURE.to_string());
            tracing::warn!(status = status.as_u16(), %message, "registration rejected");
            return Err(DriveError::request(status.as_u16(), message));
        }

        response.json().await.map_err(|e| transport_error(FAILURE, e))
    }
}

/// Pull `detail` out of an error body. Validation errors carry a list of
/// `{msg}` objects instead of a string.
fn detail_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    }
}
