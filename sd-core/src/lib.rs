//! Secure Drive Core
//!
//! Domain types, display formatting and list-query building shared by the
//! HTTP client and the file view-model.

pub mod config;
pub mod entry;
pub mod error;
pub mod format;
pub mod query;
pub mod record;
pub mod stats;
pub mod store;

pub use config::DriveConfig;
pub use entry::{EntryDisplay, EntryKind, FileEntry};
pub use error::{DriveError, DriveResult};
pub use format::{format_bytes, format_relative_date, infer_type};
pub use query::{build_list_params, ListQuery, SortKey, SortOrder};
pub use record::{CreatedObject, DeleteConfirmation, ListResponse, ObjectRecord};
pub use stats::StorageStats;
pub use store::{ObjectStore, UploadFile};
