// SPDX-License-Identifier: AGPL-3.0-or-later
//! Display formatting for sizes, timestamps and file types
//!
//! Everything here is pure: the current time is always passed in.

use chrono::{DateTime, Utc};

/// en-US short calendar date, e.g. `1/15/2024`
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Label used when a file name carries no extension
pub const GENERIC_TYPE: &str = "FILE";

const UNITS: [&str; 6] = ["Bytes", "KB", "MB", "GB", "TB", "PB"];

/// Format a byte count using 1024-based units, at most two decimals.
///
/// Values past the last unit stay in `PB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scale: u64 = 1;
    while unit + 1 < UNITS.len() && bytes / scale >= 1024 {
        scale *= 1024;
        unit += 1;
    }

    let value = ((bytes as f64 / scale as f64) * 100.0).round() / 100.0;
    format!("{} {}", value, UNITS[unit])
}

/// Relative description of `timestamp` as seen from `now`.
///
/// Units truncate and are never singularised ("1 hours ago").
pub fn format_relative_date(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_relative_date_with(timestamp, now, DEFAULT_DATE_FORMAT)
}

/// Same as [`format_relative_date`] with a custom strftime pattern for
/// timestamps older than a week. The pattern must be valid.
pub fn format_relative_date_with(
    timestamp: DateTime<Utc>,
    now: DateTime<Utc>,
    date_format: &str,
) -> String {
    // Clock skew can put server timestamps slightly in the future
    let diff = (now - timestamp).max(chrono::Duration::zero());

    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if minutes < 60 {
        format!("{} minutes ago", minutes)
    } else if hours < 24 {
        format!("{} hours ago", hours)
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else {
        timestamp.format(date_format).to_string()
    }
}

/// Uppercased extension of `name`, or [`GENERIC_TYPE`]
pub fn infer_type(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_uppercase(),
        _ => GENERIC_TYPE.to_string(),
    }
}
