// SPDX-License-Identifier: AGPL-3.0-or-later
//! List query options

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort column. Unknown values are passed to the server untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Name,
    Size,
    CreatedAt,
    Other(String),
}

impl SortKey {
    pub fn as_str(&self) -> &str {
        match self {
            SortKey::Name => "name",
            SortKey::Size => "size",
            SortKey::CreatedAt => "created_at",
            SortKey::Other(s) => s,
        }
    }
}

impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        match s {
            "name" => SortKey::Name,
            "size" => SortKey::Size,
            "created_at" => SortKey::CreatedAt,
            other => SortKey::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction. Unknown values are passed to the server untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
    Other(String),
}

impl SortOrder {
    pub fn as_str(&self) -> &str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
            SortOrder::Other(s) => s,
        }
    }
}

impl From<&str> for SortOrder {
    fn from(s: &str) -> Self {
        match s {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            other => SortOrder::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter, sort and pagination for `GET /objects`.
///
/// Only fields that are set end up in the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub folder: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<SortKey>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort_by(mut self, key: impl Into<SortKey>) -> Self {
        self.sort_by = Some(key.into());
        self
    }

    pub fn sort_order(mut self, order: impl Into<SortOrder>) -> Self {
        self.sort_order = Some(order.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Zero-based page `index` of `size` entries
    pub fn page(self, index: u64, size: u64) -> Self {
        self.limit(size).offset(index.saturating_mul(size))
    }

    /// Query pairs in the fixed order
    /// `folder, search, sort_by, sort_order, limit, offset`.
    ///
    /// An empty search means no filter and is dropped, as are a zero
    /// `limit` or `offset`. An empty folder is still sent.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(6);

        if let Some(folder) = &self.folder {
            params.push(("folder", folder.clone()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(key) = &self.sort_by {
            params.push(("sort_by", key.as_str().to_string()));
        }
        if let Some(order) = &self.sort_order {
            params.push(("sort_order", order.as_str().to_string()));
        }
        if let Some(limit) = self.limit.filter(|&l| l > 0) {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset.filter(|&o| o > 0) {
            params.push(("offset", offset.to_string()));
        }

        params
    }
}

/// Free-function form of [`ListQuery::to_params`]
pub fn build_list_params(query: &ListQuery) -> Vec<(&'static str, String)> {
    query.to_params()
}
