// SPDX-License-Identifier: MPL-2.0
//! Optional process-wide store for text toasts.
//!
//! Hosts that prefer ambient calls (`global::show(...)` from anywhere)
//! install one store at startup. Everything else should pass a [`Store`]
//! explicitly.

use super::id::ToastId;
use super::scheduler::Scheduler;
use super::store::Store;
use super::types::{ToastOptions, ToastType};
use crate::error::{Error, Result};
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Store<String>> = OnceLock::new();

/// Installs the process-wide store.
///
/// # Errors
///
/// Returns [`Error::AlreadyInstalled`] if a store was installed before; the
/// existing store is kept.
pub fn install(scheduler: Arc<dyn Scheduler>) -> Result<Store<String>> {
    GLOBAL
        .set(Store::new(scheduler))
        .map_err(|_| Error::AlreadyInstalled)?;
    tracing::debug!("global toast store installed");
    store().ok_or(Error::AlreadyInstalled)
}

/// The installed store, if any.
#[must_use]
pub fn store() -> Option<Store<String>> {
    GLOBAL.get().cloned()
}

/// Shows a toast on the installed store. Returns `None` if nothing is
/// installed.
pub fn show(kind: ToastType, message: impl Into<String>) -> Option<ToastId> {
    let store = GLOBAL.get()?;
    Some(store.show(kind, message.into(), ToastOptions::new()))
}

/// Dismisses a toast on the installed store.
pub fn dismiss(id: &ToastId) {
    if let Some(store) = GLOBAL.get() {
        store.dismiss(Some(id));
    }
}
