// SPDX-License-Identifier: AGPL-3.0-or-later
//! File view-model
//!
//! Overlapping refreshes are not cancelled. Each one takes a token when it
//! is issued and only the most recently issued refresh may replace the
//! listing; older responses are dropped when they arrive. The listing
//! therefore always shows the result of exactly one refresh.
//!
//! The query that produced the listing is stored with it, so paging and
//! reloads start from what is on screen rather than from a refresh that
//! may have failed.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use sd_core::{
    config::DisplayConfig, entry::map_records, CreatedObject, DeleteConfirmation, DriveResult,
    FileEntry, ListQuery, ObjectStore, UploadFile,
};
use std::sync::Arc;

use crate::guard::{LoadingGuard, UploadGuard};
use crate::state::ViewState;

/// Source of "now" for relative timestamps
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// What a completed refresh did to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The listing and stats were replaced
    Applied,
    /// A newer refresh was issued meanwhile; this response was dropped
    Superseded,
}

pub(crate) struct Inner {
    pub(crate) state: ViewState,
    pub(crate) refreshes_in_flight: usize,
    /// Query of the refresh whose result is shown
    applied_query: ListQuery,
    /// Token of the most recently issued refresh
    issued: u64,
}

pub struct FileViewModel {
    store: Arc<dyn ObjectStore>,
    inner: Mutex<Inner>,
    display: DisplayConfig,
    clock: Clock,
}

impl FileViewModel {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self::with_display(store, DisplayConfig::default())
    }

    pub fn with_display(store: Arc<dyn ObjectStore>, display: DisplayConfig) -> Self {
        Self {
            store,
            inner: Mutex::new(Inner {
                state: ViewState::default(),
                refreshes_in_flight: 0,
                applied_query: ListQuery::default(),
                issued: 0,
            }),
            display,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ViewState {
        self.inner.lock().state.clone()
    }

    pub fn current_query(&self) -> ListQuery {
        self.inner.lock().applied_query.clone()
    }

    pub fn selected_entry(&self) -> Option<FileEntry> {
        self.inner.lock().state.selected_entry().cloned()
    }

    pub fn download_url(&self, object_id: &str) -> String {
        self.store.download_url(object_id)
    }

    /// Fetch the listing for `query` together with storage stats and replace
    /// both at once. On any failure the previous listing stays in place.
    pub async fn refresh(&self, query: ListQuery) -> DriveResult<RefreshOutcome> {
        let token = {
            let mut inner = self.inner.lock();
            inner.issued += 1;
            inner.issued
        };
        let _loading = LoadingGuard::acquire(&self.inner);

        let (listing, stats) =
            tokio::join!(self.store.list_files(&query), self.store.storage_stats());
        let listing = listing?;
        let stats = stats?;
        let entries = map_records(&listing.items, (self.clock)(), &self.display.date_format)?;

        let mut inner = self.inner.lock();
        if inner.issued != token {
            tracing::debug!(token, latest = inner.issued, "dropping superseded refresh");
            return Ok(RefreshOutcome::Superseded);
        }
        inner.state.entries = entries;
        inner.state.total = listing.total;
        inner.state.stats = stats;
        inner.applied_query = query;
        Ok(RefreshOutcome::Applied)
    }

    /// Refresh with the query of the listing currently shown
    pub async fn reload(&self) -> DriveResult<RefreshOutcome> {
        let query = self.current_query();
        self.refresh(query).await
    }

    /// Move to the next page if the applied total says there is one
    pub async fn next_page(&self) -> DriveResult<Option<RefreshOutcome>> {
        let (query, total) = {
            let inner = self.inner.lock();
            (inner.applied_query.clone(), inner.state.total)
        };
        let limit = query.limit.unwrap_or(self.display.page_size);
        let offset = query.offset.unwrap_or(0);
        if offset.saturating_add(limit) >= total {
            return Ok(None);
        }
        self.refresh(query.limit(limit).offset(offset + limit))
            .await
            .map(Some)
    }

    pub async fn previous_page(&self) -> DriveResult<Option<RefreshOutcome>> {
        let query = self.current_query();
        let limit = query.limit.unwrap_or(self.display.page_size);
        let offset = query.offset.unwrap_or(0);
        if offset == 0 {
            return Ok(None);
        }
        self.refresh(query.limit(limit).offset(offset.saturating_sub(limit)))
            .await
            .map(Some)
    }

    /// Upload a file, then reconcile the listing with a refresh.
    ///
    /// Fails with `Busy` without touching the network if another upload is
    /// still outstanding. Once the server has stored the file the created
    /// object is returned even if the reconciling refresh fails.
    pub async fn upload(
        &self,
        file: UploadFile,
        folder: Option<&str>,
        logical_name: Option<&str>,
    ) -> DriveResult<CreatedObject> {
        let created = {
            let _uploading = UploadGuard::try_acquire(&self.inner)?;
            self.store.upload_file(file, folder, logical_name).await?
        };
        tracing::info!(object_id = %created.object_id, name = %created.name, "uploaded");

        if let Err(e) = self.reload().await {
            tracing::warn!(
                object_id = %created.object_id,
                error = %e,
                "listing not reconciled after upload"
            );
        }
        Ok(created)
    }

    /// Delete an object and drop its row once the server confirms
    pub async fn remove(&self, object_id: &str) -> DriveResult<DeleteConfirmation> {
        let confirmation = self.store.delete_file(object_id).await?;
        tracing::info!(object_id, "deleted");

        let mut inner = self.inner.lock();
        let before = inner.state.entries.len();
        inner.state.entries.retain(|e| e.object_id != object_id);
        if inner.state.entries.len() < before {
            inner.state.total = inner.state.total.saturating_sub(1);
        }
        if inner.state.selected_menu_id.as_deref() == Some(object_id) {
            inner.state.selected_menu_id = None;
        }
        Ok(confirmation)
    }

    /// Open the action menu for `object_id`, or close it if it is already
    /// open. Ids not in the listing are ignored. Returns the open menu.
    pub fn toggle_menu(&self, object_id: &str) -> Option<String> {
        let mut inner = self.inner.lock();
        let state = &mut inner.state;
        if state.selected_menu_id.as_deref() == Some(object_id) {
            state.selected_menu_id = None;
        } else if state.contains(object_id) {
            state.selected_menu_id = Some(object_id.to_string());
        } else {
            tracing::debug!(object_id, "menu toggle for unknown entry ignored");
        }
        state.selected_menu_id.clone()
    }

    pub fn close_menu(&self) {
        self.inner.lock().state.selected_menu_id = None;
    }
}
