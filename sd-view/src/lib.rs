// SPDX-License-Identifier: AGPL-3.0-or-later
//! File list view-model for Secure Drive
//!
//! [`FileViewModel`] owns the state a file listing renders from and is the
//! only thing that mutates it. Presentation code reads [`ViewState`]
//! snapshots and calls back into the view-model's operations.
//!
//! ```text
//! UI event ──► FileViewModel ──► ObjectStore ──► object API
//!                    ▲                 │
//!                    └── FileEntry ◄───┘ (validated + formatted)
//! ```

mod guard;
pub mod state;
pub mod view_model;

#[cfg(test)]
mod testing;

pub use state::ViewState;
pub use view_model::{Clock, FileViewModel, RefreshOutcome};
