// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for Secure Drive

use thiserror::Error;

/// Result type alias
pub type DriveResult<T> = Result<T, DriveError>;

/// Main error type
#[derive(Error, Debug)]
pub enum DriveError {
    /// Non-success HTTP status (`status` set) or transport failure (`status` empty)
    #[error("Request failed{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Request { status: Option<u16>, message: String },

    #[error("Invalid server record: {0}")]
    InvalidRecord(String),

    #[error("Busy: {0} already in progress")]
    Busy(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DriveError {
    pub fn request(status: u16, message: impl Into<String>) -> Self {
        DriveError::Request { status: Some(status), message: message.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        DriveError::Request { status: None, message: message.into() }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            DriveError::Request { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Host unreachable, connection reset, undecodable body
    pub fn is_transport(&self) -> bool {
        matches!(self, DriveError::Request { status: None, .. })
    }
}
