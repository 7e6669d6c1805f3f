// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo application.

use crate::toast::{ToastPosition, ToastType};
use crate::ui::toaster;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Show a toast of the given type.
    Show(ToastType),
    /// Start a simulated task tracked by a promise toast.
    ShowPromise,
    /// The simulated task finished (`true` on success).
    PromiseSettled(bool),
    DismissAll,
    /// Forget every toast immediately.
    ClearAll,
    Toaster(toaster::Message),
    /// Periodic tick driving the toast timers.
    Tick(Instant),
}

/// Runtime flags passed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Explicit config file, bypassing the config directory lookup.
    pub config_path: Option<PathBuf>,
    /// Overrides the configured default position.
    pub position: Option<ToastPosition>,
    pub reverse_order: bool,
}
