// SPDX-License-Identifier: AGPL-3.0-or-later
//! Object store trait

use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;

use crate::{
    error::{DriveError, DriveResult},
    query::ListQuery,
    record::{CreatedObject, DeleteConfirmation, ListResponse},
    stats::StorageStats,
};

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// File content to upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a local file, guessing the content type from its extension
    pub async fn from_path(path: impl AsRef<Path>) -> DriveResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DriveError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("not a file path: {}", path.display()),
            )))?
            .to_string();
        let data = tokio::fs::read(path).await?;
        let content_type = mime_guess::from_path(path).first().map(|m| m.to_string());

        Ok(Self {
            file_name,
            content_type,
            data: Bytes::from(data),
        })
    }

    pub fn content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Remote object storage.
///
/// Every call except [`ObjectStore::download_url`] is one round trip with no
/// caching, retry or de-duplication.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn list_files(&self, query: &ListQuery) -> DriveResult<ListResponse>;
    async fn storage_stats(&self) -> DriveResult<StorageStats>;
    async fn upload_file(
        &self,
        file: UploadFile,
        folder: Option<&str>,
        logical_name: Option<&str>,
    ) -> DriveResult<CreatedObject>;
    async fn delete_file(&self, object_id: &str) -> DriveResult<DeleteConfirmation>;

    /// Retrieval URL for an object; no network access
    fn download_url(&self, object_id: &str) -> String;
}
