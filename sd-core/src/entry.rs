// SPDX-License-Identifier: AGPL-3.0-or-later
//! File entries as shown in a listing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DriveResult;
use crate::format::{format_bytes, format_relative_date_with, infer_type};
use crate::record::ObjectRecord;

/// Entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    File,
    Folder,
}

/// Display-ready strings derived from the raw record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDisplay {
    pub type_label: String,
    pub size_label: String,
    pub modified_label: String,
}

/// A stored object, identified by `object_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub object_id: String,
    pub name: String,
    pub kind: EntryKind,
    pub folder: Option<String>,
    /// Zero for folders
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
    pub display: EntryDisplay,
}

impl FileEntry {
    /// Validate a server record and derive its display fields relative to `now`
    pub fn from_record(
        record: &ObjectRecord,
        now: DateTime<Utc>,
        date_format: &str,
    ) -> DriveResult<Self> {
        let created_at = record.validate()?;
        let kind = if record.is_folder.unwrap_or(false) {
            EntryKind::Folder
        } else {
            EntryKind::File
        };

        let (size_bytes, type_label, size_label) = match kind {
            EntryKind::Folder => (0, "Folder".to_string(), "—".to_string()),
            EntryKind::File => {
                let size = record.size_bytes.unwrap_or(0);
                (size, infer_type(&record.name), format_bytes(size))
            }
        };

        Ok(Self {
            object_id: record.object_id.clone(),
            name: record.name.clone(),
            kind,
            folder: record.folder.clone(),
            size_bytes,
            created_at,
            display: EntryDisplay {
                type_label,
                size_label,
                modified_label: format_relative_date_with(created_at, now, date_format),
            },
        })
    }

    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Map a whole page of records; one invalid record rejects the page
pub fn map_records(
    records: &[ObjectRecord],
    now: DateTime<Utc>,
    date_format: &str,
) -> DriveResult<Vec<FileEntry>> {
    records
        .iter()
        .map(|r| FileEntry::from_record(r, now, date_format))
        .collect()
}
