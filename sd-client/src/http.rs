// SPDX-License-Identifier: AGPL-3.0-or-later
//! reqwest-backed object store

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use sd_core::{
    build_list_params, CreatedObject, DeleteConfirmation, DriveConfig, DriveError, DriveResult,
    ListQuery, ListResponse, ObjectStore, StorageStats, UploadFile,
};
use serde::de::DeserializeOwned;

use crate::transport_error;

/// Object store reached over HTTP. Holds no state beyond the base URL and
/// the connection pool.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    base_url: String,
    http: Client,
}

impl HttpObjectStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn from_config(config: &DriveConfig) -> Self {
        Self::new(config.api.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn objects_url(&self) -> String {
        format!("{}/objects", self.base_url)
    }

    /// Turn a non-success status into a request error
    async fn check(response: Response, failure: &str) -> DriveResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), body = %body, "{}", failure);
        Err(DriveError::request(status.as_u16(), failure))
    }

    async fn decode<T: DeserializeOwned>(response: Response, failure: &str) -> DriveResult<T> {
        let response = Self::check(response, failure).await?;
        response.json().await.map_err(|e| transport_error(failure, e))
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn list_files(&self, query: &ListQuery) -> DriveResult<ListResponse> {
        const FAILURE: &str = "Failed to fetch files";
        let params = build_list_params(query);
        tracing::debug!(?params, "GET /objects");

        let response = self
            .http
            .get(self.objects_url())
            .query(&params)
            .send()
            .await
            .map_err(|e| transport_error(FAILURE, e))?;

        Self::decode(response, FAILURE).await
    }

    async fn storage_stats(&self) -> DriveResult<StorageStats> {
        const FAILURE: &str = "Failed to fetch storage stats";
        tracing::debug!("GET /objects/stats");

        let response = self
            .http
            .get(format!("{}/stats", self.objects_url()))
            .send()
            .await
            .map_err(|e| transport_error(FAILURE, e))?;

        Self::decode(response, FAILURE).await
    }

    async fn upload_file(
        &self,
        file: UploadFile,
        folder: Option<&str>,
        logical_name: Option<&str>,
    ) -> DriveResult<CreatedObject> {
        const FAILURE: &str = "Failed to upload file";
        tracing::debug!(
            file = %file.file_name,
            bytes = file.len(),
            ?folder,
            ?logical_name,
            "POST /objects"
        );

        let content_type = file.content_type().to_string();
        let part = multipart::Part::bytes(file.data.to_vec())
            .file_name(file.file_name)
            .mime_str(&content_type)
            .map_err(|e| transport_error(FAILURE, e))?;

        let mut form = multipart::Form::new().part("file", part);
        if let Some(folder) = folder.filter(|f| !f.is_empty()) {
            form = form.text("folder", folder.to_string());
        }
        if let Some(name) = logical_name.filter(|n| !n.is_empty()) {
            form = form.text("logical_name", name.to_string());
        }

        let response = self
            .http
            .post(self.objects_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error(FAILURE, e))?;

        Self::decode(response, FAILURE).await
    }

    async fn delete_file(&self, object_id: &str) -> DriveResult<DeleteConfirmation> {
        const FAILURE: &str = "Failed to delete file";
        // Dot segments survive encoding and would be resolved away by the URL parser
        if matches!(object_id, "" | "." | "..") {
            return Err(DriveError::InvalidRecord(format!(
                "object id {object_id:?} is not a path segment"
            )));
        }
        tracing::debug!(object_id, "DELETE /objects/{{id}}");

        let response = self
            .http
            .delete(self.download_url(object_id))
            .send()
            .await
            .map_err(|e| transport_error(FAILURE, e))?;

        Self::decode(response, FAILURE).await
    }

    /// The id is encoded as a single path segment, `/` included.
    fn download_url(&self, object_id: &str) -> String {
        format!("{}/{}", self.objects_url(), urlencoding::encode(object_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{closed_port_url, serve};
    use axum::{
        extract::{Multipart, Path, RawQuery, State},
        http::StatusCode,
        routing::{delete, get},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<String>>>;

    async fn list(State(seen): State<Seen>, RawQuery(query): RawQuery) -> Json<Value> {
        seen.lock().unwrap().push(query.unwrap_or_default());
        Json(json!({
            "items": [{
                "object_id": "a1",
                "name": "report.pdf",
                "folder": null,
                "size_bytes": 2516582,
                "created_at": "2024-01-01T10:00:00Z"
            }],
            "total": 1
        }))
    }

    async fn stats() -> Json<Value> {
        Json(json!({ "total_files": 3, "total_mb": 4.5 }))
    }

    async fn upload(State(seen): State<Seen>, mut multipart: Multipart) -> Json<Value> {
        let mut name = String::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let field_name = field.name().unwrap_or_default().to_string();
            match field_name.as_str() {
                "file" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content_type = field.content_type().unwrap_or_default().to_string();
                    let data = field.bytes().await.unwrap();
                    name = file_name.clone();
                    seen.lock().unwrap().push(format!(
                        "file={}|{}|{}",
                        file_name,
                        content_type,
                        String::from_utf8_lossy(&data)
                    ));
                }
                other => {
                    let text = field.text().await.unwrap();
                    if other == "logical_name" {
                        name = text.clone();
                    }
                    seen.lock().unwrap().push(format!("{}={}", other, text));
                }
            }
        }
        Json(json!({
            "object_id": "new-1",
            "user_id": "u1",
            "object_key": "u1/new-1",
            "name": name,
            "content_type": "text/plain",
            "size_bytes": 5,
            "sha256": "2cf24dba"
        }))
    }

    async fn remove(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
        if id == "a1" {
            (StatusCode::OK, Json(json!({ "deleted": id })))
        } else {
            (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found" })))
        }
    }

    async fn store() -> (HttpObjectStore, Seen) {
        let seen: Seen = Arc::default();
        let router = Router::new()
            .route("/api/objects", get(list).post(upload))
            .route("/api/objects/stats", get(stats))
            .route("/api/objects/:id", delete(remove))
            .route("/api/auth/register", delete(|| async { Json(json!({ "deleted": "account" })) }))
            .with_state(seen.clone());
        (HttpObjectStore::new(serve(router).await), seen)
    }

    fn upload_payload() -> UploadFile {
        UploadFile::new("hello.txt", b"hello".to_vec()).with_content_type("text/plain")
    }

    #[tokio::test]
    async fn test_list_files_sends_only_set_params() {
        let (store, seen) = store().await;

        let query = ListQuery::new().search("").limit(10);
        let resp = store.list_files(&query).await.unwrap();
        assert_eq!(resp.total, 1);
        assert_eq!(resp.items[0].name, "report.pdf");

        let query = ListQuery::new().folder("docs").sort_by("name").sort_order("asc").offset(20);
        store.list_files(&query).await.unwrap();

        store.list_files(&ListQuery::new()).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], "limit=10");
        assert_eq!(seen[1], "folder=docs&sort_by=name&sort_order=asc&offset=20");
        assert_eq!(seen[2], "");
    }

    #[tokio::test]
    async fn test_storage_stats() {
        let (store, _) = store().await;
        let stats = store.storage_stats().await.unwrap();
        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_mb, 4.5);
    }

    #[tokio::test]
    async fn test_upload_omits_absent_fields() {
        let (store, seen) = store().await;

        let created = store.upload_file(upload_payload(), None, Some("")).await.unwrap();
        assert_eq!(created.object_id, "new-1");
        assert_eq!(created.name, "hello.txt");

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec!["file=hello.txt|text/plain|hello".to_string()]);
    }

    #[tokio::test]
    async fn test_upload_with_folder_and_name() {
        let (store, seen) = store().await;

        let created = store
            .upload_file(upload_payload(), Some("docs"), Some("greeting.txt"))
            .await
            .unwrap();
        assert_eq!(created.name, "greeting.txt");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[1], "folder=docs");
        assert_eq!(seen[2], "logical_name=greeting.txt");
    }

    #[tokio::test]
    async fn test_delete_file() {
        let (store, _) = store().await;

        let confirmation = store.delete_file("a1").await.unwrap();
        assert_eq!(confirmation.0, json!({ "deleted": "a1" }));

        let err = store.delete_file("missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Request failed (404): Failed to delete file");
    }

    #[tokio::test]
    async fn test_delete_stays_under_objects() {
        let (store, _) = store().await;

        let err = store.delete_file("../auth/register").await.unwrap_err();
        assert!(err.is_not_found());

        for id in ["..", ".", ""] {
            let err = store.delete_file(id).await.unwrap_err();
            assert!(matches!(err, DriveError::InvalidRecord(_)), "{id:?}: {err}");
        }
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let router = Router::new().route(
            "/api/objects/stats",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let store = HttpObjectStore::new(serve(router).await);

        let err = store.storage_stats().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let store = HttpObjectStore::new(closed_port_url().await);

        let err = store.list_files(&ListQuery::new()).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_download_url() {
        let store = HttpObjectStore::new("http://localhost:8000/api/");
        assert_eq!(store.base_url(), "http://localhost:8000/api");
        assert_eq!(store.download_url("a1"), "http://localhost:8000/api/objects/a1");
        assert_eq!(
            store.download_url("../auth/register"),
            "http://localhost:8000/api/objects/..%2Fauth%2Fregister"
        );
        assert_eq!(
            store.download_url("my file?.txt"),
            "http://localhost:8000/api/objects/my%20file%3F.txt"
        );
    }
}
