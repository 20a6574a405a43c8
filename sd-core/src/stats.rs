// SPDX-License-Identifier: AGPL-3.0-or-later
//! Account-wide storage usage

use serde::{Deserialize, Serialize};

/// Usage reported by `GET /objects/stats`, independent of any list page
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageStats {
    #[serde(default)]
    pub total_files: u64,
    #[serde(default)]
    pub total_mb: f64,
}

impl StorageStats {
    pub fn total_bytes(&self) -> u64 {
        (self.total_mb.max(0.0) * 1024.0 * 1024.0).round() as u64
    }
}
