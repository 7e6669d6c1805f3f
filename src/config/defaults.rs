// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Store**: Capacity of the tracked toast list and removal grace period
//! - **Lifetime**: Auto-dismiss durations per toast type
//! - **Layout**: Gutter and container offset used for stacking

use std::time::Duration;

// ==========================================================================
// Store Defaults
// ==========================================================================

/// Maximum number of toasts tracked at once. Older toasts are evicted first.
pub const TOAST_LIMIT: usize = 20;

/// Grace period between a dismissal and the purge of the toast from the
/// store, leaving room for an exit animation.
pub const TOAST_EXPIRE_DISMISS_DELAY: Duration = Duration::from_millis(1000);

/// Length of generated toast identifiers.
pub const TOAST_ID_LENGTH: usize = 9;

// ==========================================================================
// Lifetime Defaults
// ==========================================================================

/// Default lifetime of blank toasts (in milliseconds).
pub const DEFAULT_BLANK_DURATION_MS: u64 = 4000;

/// Default lifetime of success toasts (in milliseconds).
pub const DEFAULT_SUCCESS_DURATION_MS: u64 = 2000;

/// Default lifetime of error toasts (in milliseconds).
pub const DEFAULT_ERROR_DURATION_MS: u64 = 4000;

/// Default lifetime of custom toasts (in milliseconds).
pub const DEFAULT_CUSTOM_DURATION_MS: u64 = 4000;

// Loading toasts never expire on their own.

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Vertical spacing between stacked toasts (in pixels).
pub const DEFAULT_GUTTER: f32 = 8.0;

/// Distance between the toaster container and the window edges (in pixels).
pub const DEFAULT_CONTAINER_OFFSET: f32 = 16.0;

/// Duration of the slide transition applied when a toast moves.
pub const PLACEMENT_TRANSITION: Duration = Duration::from_millis(230);
