// SPDX-License-Identifier: AGPL-3.0-or-later
//! Scoped flag guards
//!
//! Both guards restore their flag on drop, so every exit path out of an
//! operation (success, `?`, cancelled future) clears it.

use parking_lot::Mutex;
use sd_core::{DriveError, DriveResult};

use crate::view_model::Inner;

/// Keeps `loading` set while at least one refresh is outstanding
pub(crate) struct LoadingGuard<'a> {
    inner: &'a Mutex<Inner>,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn acquire(inner: &'a Mutex<Inner>) -> Self {
        let mut guard = inner.lock();
        guard.refreshes_in_flight += 1;
        guard.state.loading = true;
        Self { inner }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut guard = self.inner.lock();
        guard.refreshes_in_flight = guard.refreshes_in_flight.saturating_sub(1);
        guard.state.loading = guard.refreshes_in_flight > 0;
    }
}

/// In-flight guard for uploads: at most one per view-model
pub(crate) struct UploadGuard<'a> {
    inner: &'a Mutex<Inner>,
}

impl<'a> UploadGuard<'a> {
    pub(crate) fn try_acquire(inner: &'a Mutex<Inner>) -> DriveResult<Self> {
        let mut guard = inner.lock();
        if guard.state.uploading {
            return Err(DriveError::Busy("upload"));
        }
        guard.state.uploading = true;
        Ok(Self { inner })
    }
}

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        self.inner.lock().state.uploading = false;
    }
}
