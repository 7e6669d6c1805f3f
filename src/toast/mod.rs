// SPDX-License-Identifier: MPL-2.0
//! Toast notification core: store, lifecycle timers and layout.
//!
//! This module holds everything that does not depend on a UI toolkit.
//! Toasts are kept in a [`Store`], mutated only through [`Action`]s applied
//! by a reducer, and observed by one [`Toaster`] per mounted view.
//!
//! # Components
//!
//! - [`id`] - Random short identifiers for toasts
//! - [`types`] - `Toast` entity, options and the closed enums describing it
//! - [`scheduler`] - Cancellable timers (tokio-backed or manually driven)
//! - [`store`] - Reducer, listener registry and removal queue
//! - [`api`] - Convenience constructors (`success`, `error`, `promise`, ...)
//! - [`toaster`] - Per-view auto-dismiss timers, pause handling and offsets
//! - [`global`] - Optional process-wide store
//!
//! # Usage
//!
//! ```ignore
//! use iced_toast::toast::{ManualScheduler, Store, Toaster, ToasterOptions, ToastOptions};
//! use std::sync::Arc;
//!
//! let scheduler = Arc::new(ManualScheduler::new());
//! let store: Store<String> = Store::new(scheduler.clone());
//! let toaster = Toaster::mount(&store, ToasterOptions::default());
//!
//! let id = store.success("Image saved".to_string(), ToastOptions::default());
//! scheduler.advance(std::time::Duration::from_secs(3));
//! ```
//!
//! # Lifecycle
//!
//! A toast is inserted visible, dismissed when its lifetime runs out (or on
//! request), and purged from the store one second after its dismissal.

pub mod api;
pub mod global;
pub mod id;
pub mod scheduler;
pub mod store;
pub mod toaster;
pub mod types;

pub use api::{create_toast, PromiseMessages};
pub use id::ToastId;
pub use scheduler::{ManualScheduler, Scheduler, Task, TimerHandle, TokioScheduler};
pub use store::{reduce, Action, Effect, State, Store, Subscription, WeakStore};
pub use toaster::{
    calculate_offset, Justify, OffsetOptions, Placement, ToastLayout, Toaster, ToasterOptions,
    VerticalAnchor,
};
pub use types::{
    AriaLive, AriaProps, AriaRole, Countdown, DefaultToastOptions, IconTheme, Lifetime, Style,
    Toast, ToastOptions, ToastPatch, ToastPosition, ToastType,
};
