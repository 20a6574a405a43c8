// SPDX-License-Identifier: AGPL-3.0-or-later
//! View state

use sd_core::{FileEntry, StorageStats};
use serde::Serialize;

/// Everything a file listing renders from
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    pub entries: Vec<FileEntry>,
    /// Server-side match count for the applied query, across all pages
    pub total: u64,
    pub loading: bool,
    pub uploading: bool,
    pub stats: StorageStats,
    /// Row whose action menu is open. Not revalidated after a refresh.
    pub selected_menu_id: Option<String>,
}

impl ViewState {
    pub fn entry(&self, object_id: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.object_id == object_id)
    }

    pub fn contains(&self, object_id: &str) -> bool {
        self.entry(object_id).is_some()
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selected_menu_id.as_deref().and_then(|id| self.entry(id))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
