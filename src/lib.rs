// SPDX-License-Identifier: MPL-2.0
//! `iced_toast` provides toast notifications for the Iced GUI framework.
//!
//! The [`toast`] module is toolkit-agnostic: a store with a reducer and a
//! removal queue, convenience constructors, and a per-view toaster computing
//! auto-dismiss timers and stacking offsets. The [`ui`] module renders a
//! toaster with iced widgets, and [`app`] is a small playground window.

#![doc(html_root_url = "https://docs.rs/iced_toast/0.3.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod toast;
pub mod ui;
