//! Scripted object store for view-model tests
//!
//! Each operation pops the next queued result. A result can be gated on a
//! oneshot so tests decide when the "network" answers.

use async_trait::async_trait;
use sd_core::{
    build_list_params, CreatedObject, DeleteConfirmation, DriveError, DriveResult, ListQuery,
    ListResponse, ObjectRecord, ObjectStore, StorageStats, UploadFile,
};
use serde_json::Map;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

struct Scripted<T> {
    result: DriveResult<T>,
    gate: Option<oneshot::Receiver<()>>,
}

type Queue<T> = Mutex<VecDeque<Scripted<T>>>;

#[derive(Default)]
pub struct ScriptedStore {
    lists: Queue<ListResponse>,
    stats: Queue<StorageStats>,
    uploads: Queue<CreatedObject>,
    deletes: Queue<DeleteConfirmation>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_list(&self, result: DriveResult<ListResponse>) {
        push(&self.lists, result, None);
    }

    pub fn push_list_gated(&self, result: DriveResult<ListResponse>, gate: oneshot::Receiver<()>) {
        push(&self.lists, result, Some(gate));
    }

    pub fn push_stats(&self, result: DriveResult<StorageStats>) {
        push(&self.stats, result, None);
    }

    pub fn push_upload(&self, result: DriveResult<CreatedObject>) {
        push(&self.uploads, result, None);
    }

    pub fn push_upload_gated(
        &self,
        result: DriveResult<CreatedObject>,
        gate: oneshot::Receiver<()>,
    ) {
        push(&self.uploads, result, Some(gate));
    }

    pub fn push_delete(&self, result: DriveResult<DeleteConfirmation>) {
        push(&self.deletes, result, None);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose description starts with `op`
    pub fn count(&self, op: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(op))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn push<T>(queue: &Queue<T>, result: DriveResult<T>, gate: Option<oneshot::Receiver<()>>) {
    queue.lock().unwrap().push_back(Scripted { result, gate });
}

async fn next<T>(queue: &Queue<T>, op: &str) -> DriveResult<T> {
    let scripted = queue.lock().unwrap().pop_front();
    let Some(Scripted { result, gate }) = scripted else {
        return Err(DriveError::transport(format!("unscripted {op} call")));
    };
    if let Some(gate) = gate {
        let _ = gate.await;
    }
    result
}

#[async_trait]
impl ObjectStore for ScriptedStore {
    async fn list_files(&self, query: &ListQuery) -> DriveResult<ListResponse> {
        let mut call = "list".to_string();
        for (key, value) in build_list_params(query) {
            call.push_str(&format!(" {key}={value}"));
        }
        self.record(call);
        next(&self.lists, "list").await
    }

    async fn storage_stats(&self) -> DriveResult<StorageStats> {
        self.record("stats".into());
        next(&self.stats, "stats").await
    }

    async fn upload_file(
        &self,
        file: UploadFile,
        folder: Option<&str>,
        logical_name: Option<&str>,
    ) -> DriveResult<CreatedObject> {
        self.record(format!(
            "upload {} folder={:?} name={:?}",
            file.file_name, folder, logical_name
        ));
        next(&self.uploads, "upload").await
    }

    async fn delete_file(&self, object_id: &str) -> DriveResult<DeleteConfirmation> {
        self.record(format!("delete {object_id}"));
        next(&self.deletes, "delete").await
    }

    fn download_url(&self, object_id: &str) -> String {
        format!("mem://objects/{object_id}")
    }
}

pub fn record(object_id: &str, name: &str, size_bytes: u64) -> ObjectRecord {
    ObjectRecord {
        object_id: object_id.to_string(),
        name: name.to_string(),
        folder: None,
        is_folder: None,
        size_bytes: Some(size_bytes),
        content_type: None,
        created_at: Some("2024-01-01T10:00:00Z".to_string()),
        extra: Map::new(),
    }
}

pub fn listing(items: Vec<ObjectRecord>, total: u64) -> ListResponse {
    ListResponse { items, total }
}

pub fn stats(total_files: u64, total_mb: f64) -> StorageStats {
    StorageStats { total_files, total_mb }
}

pub fn created(object_id: &str, name: &str) -> CreatedObject {
    CreatedObject {
        object_id: object_id.to_string(),
        name: name.to_string(),
        size_bytes: None,
        content_type: None,
        sha256: None,
        object_key: None,
        user_id: None,
        extra: Map::new(),
    }
}
