// SPDX-License-Identifier: MPL-2.0
//! iced widgets for toasts.
//!
//! Follows the Elm-style "state down, messages up" pattern: views read a
//! [`Toaster`](crate::toast::Toaster) and emit [`toaster::Message`]s that
//! [`toaster::update`] applies back to it.
//!
//! - [`toaster`] - Positioned overlay, hover pause and height reporting
//! - [`toast_bar`] - Card rendering of a single toast
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`styles`] - Button styles shared by the demo controls

pub mod design_tokens;
pub mod styles;
pub mod toast_bar;
pub mod toaster;
