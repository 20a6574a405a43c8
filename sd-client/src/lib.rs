// SPDX-License-Identifier: AGPL-3.0-or-later
//! HTTP client for the Secure Drive object API
//!
//! [`HttpObjectStore`] implements [`sd_core::ObjectStore`] against the REST
//! endpoints under `/objects`. [`AuthClient`] covers account registration,
//! which sits outside the file view but shares the same base URL.

pub mod auth;
mod http;

#[cfg(test)]
mod test_support;

pub use auth::{AuthClient, RegisterRequest, RegisteredUser};
pub use http::HttpObjectStore;

use sd_core::DriveError;

/// Map a reqwest failure that never produced a status
pub(crate) fn transport_error(context: &str, err: reqwest::Error) -> DriveError {
    DriveError::transport(format!("{}: {}", context, err))
}
