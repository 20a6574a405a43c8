// SPDX-License-Identifier: AGPL-3.0-or-later
//! CLI command implementations

use console::style;
use dialoguer::Password;
use indicatif::{ProgressBar, ProgressStyle};
use sd_client::{AuthClient, HttpObjectStore, RegisterRequest};
use sd_core::{
    format_bytes, DriveConfig, DriveError, DriveResult, EntryKind, FileEntry, ListQuery,
    ObjectStore, UploadFile,
};
use sd_view::FileViewModel;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tabled::{Table, Tabled};

pub fn load_config(path: Option<&Path>) -> DriveResult<DriveConfig> {
    DriveConfig::load_or_default(path)
}

fn view_model(config: &DriveConfig) -> FileViewModel {
    let store: Arc<dyn ObjectStore> = Arc::new(HttpObjectStore::from_config(config));
    FileViewModel::with_display(store, config.display.clone())
}

#[derive(Tabled)]
struct LsRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Modified")]
    modified: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&FileEntry> for LsRow {
    fn from(entry: &FileEntry) -> Self {
        let name = match entry.kind {
            EntryKind::Folder => style(&entry.name).cyan().to_string(),
            EntryKind::File => entry.name.clone(),
        };
        Self {
            name,
            kind: entry.display.type_label.clone(),
            modified: entry.display.modified_label.clone(),
            size: entry.display.size_label.clone(),
            id: entry.object_id.clone(),
        }
    }
}

pub struct LsArgs {
    pub folder: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub limit: Option<u64>,
    pub page: u64,
}

impl LsArgs {
    fn to_query(&self, default_limit: u64) -> ListQuery {
        let mut query = ListQuery::new().page(self.page, self.limit.unwrap_or(default_limit));
        query.folder = self.folder.clone();
        query.search = self.search.clone();
        query.sort_by = self.sort.as_deref().map(Into::into);
        query.sort_order = self.order.as_deref().map(Into::into);
        query
    }
}

/// List stored files
pub async fn ls(config: &DriveConfig, args: LsArgs) -> DriveResult<()> {
    let vm = view_model(config);
    vm.refresh(args.to_query(config.display.page_size)).await?;
    let state = vm.snapshot();

    if state.is_empty() {
        println!("(no files)");
        return Ok(());
    }

    let rows: Vec<LsRow> = state.entries.iter().map(LsRow::from).collect();
    println!("{}", Table::new(rows));

    let query = vm.current_query();
    let first = query.offset.unwrap_or(0) + 1;
    let last = query.offset.unwrap_or(0) + state.entries.len() as u64;
    println!(
        "{}",
        style(format!("{}-{} of {} items", first, last, state.total)).dim()
    );

    Ok(())
}

/// Show storage usage
pub async fn stats(config: &DriveConfig) -> DriveResult<()> {
    let store = HttpObjectStore::from_config(config);
    let stats = store.storage_stats().await?;

    println!("Storage: {}", store.base_url());
    println!("  Files: {}", stats.total_files);
    println!("  Used:  {}", format_bytes(stats.total_bytes()));

    Ok(())
}

/// Upload a local file
pub async fn upload(
    config: &DriveConfig,
    path: &Path,
    folder: Option<&str>,
    name: Option<&str>,
) -> DriveResult<()> {
    let file = UploadFile::from_path(path).await?;
    let vm = view_model(config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Uploading {} ({})", file.file_name, format_bytes(file.len() as u64)));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = vm.upload(file, folder, name).await;
    spinner.finish_and_clear();
    let created = result?;

    println!(
        "Uploaded {} {}",
        style(&created.name).green(),
        style(format!("({})", created.object_id)).dim()
    );
    Ok(())
}

/// Delete stored objects
pub async fn rm(config: &DriveConfig, ids: &[String]) -> DriveResult<()> {
    let vm = view_model(config);

    for id in ids {
        vm.remove(id).await?;
        println!("Removed {}", id);
    }

    Ok(())
}

/// Print the download URL of an object
pub fn url(config: &DriveConfig, id: &str) -> DriveResult<()> {
    println!("{}", view_model(config).download_url(id));
    Ok(())
}

/// Create an account, prompting for the password
pub async fn register(config: &DriveConfig, name: String, email: String) -> DriveResult<()> {
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| DriveError::Io(std::io::Error::other(e.to_string())))?;

    let client = AuthClient::from_config(config);
    let user = client
        .register(&RegisterRequest { name, email, password })
        .await?;

    println!(
        "Account created for {}",
        style(user.email.as_deref().unwrap_or("new user")).green()
    );
    Ok(())
}
