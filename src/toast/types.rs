// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the [`Toast`] entity, the option sets used to create,
//! patch and resolve toasts, and the closed enums describing their type,
//! position and accessibility attributes.

use super::id::ToastId;
use crate::config::defaults::{
    DEFAULT_BLANK_DURATION_MS, DEFAULT_CUSTOM_DURATION_MS, DEFAULT_ERROR_DURATION_MS,
    DEFAULT_SUCCESS_DURATION_MS,
};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Type of a toast. Controls its default icon, lifetime and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastType {
    #[default]
    Blank,
    Success,
    Error,
    Loading,
    Custom,
}

impl ToastType {
    pub const ALL: [ToastType; 5] = [
        ToastType::Blank,
        ToastType::Success,
        ToastType::Error,
        ToastType::Loading,
        ToastType::Custom,
    ];

    /// Lifetime applied when neither the toast nor the toaster defaults set one.
    #[must_use]
    pub fn default_lifetime(self) -> Lifetime {
        match self {
            ToastType::Blank => Lifetime::from_millis(DEFAULT_BLANK_DURATION_MS),
            ToastType::Success => Lifetime::from_millis(DEFAULT_SUCCESS_DURATION_MS),
            ToastType::Error => Lifetime::from_millis(DEFAULT_ERROR_DURATION_MS),
            ToastType::Loading => Lifetime::Infinite,
            ToastType::Custom => Lifetime::from_millis(DEFAULT_CUSTOM_DURATION_MS),
        }
    }
}

/// Screen placement of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    TopLeft,
    #[default]
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl ToastPosition {
    pub const ALL: [ToastPosition; 6] = [
        ToastPosition::TopLeft,
        ToastPosition::TopCenter,
        ToastPosition::TopRight,
        ToastPosition::BottomLeft,
        ToastPosition::BottomCenter,
        ToastPosition::BottomRight,
    ];

    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(
            self,
            ToastPosition::TopLeft | ToastPosition::TopCenter | ToastPosition::TopRight
        )
    }

    #[must_use]
    pub fn is_center(self) -> bool {
        matches!(self, ToastPosition::TopCenter | ToastPosition::BottomCenter)
    }

    #[must_use]
    pub fn is_right(self) -> bool {
        matches!(self, ToastPosition::TopRight | ToastPosition::BottomRight)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ToastPosition::TopLeft => "top-left",
            ToastPosition::TopCenter => "top-center",
            ToastPosition::TopRight => "top-right",
            ToastPosition::BottomLeft => "bottom-left",
            ToastPosition::BottomCenter => "bottom-center",
            ToastPosition::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for ToastPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToastPosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToastPosition::ALL
            .into_iter()
            .find(|position| position.as_str() == s)
            .ok_or_else(|| Error::Config(format!("unknown toast position '{s}'")))
    }
}

/// ARIA role announced for a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AriaRole {
    #[default]
    Status,
    Alert,
}

/// ARIA live-region politeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AriaLive {
    Assertive,
    Off,
    #[default]
    Polite,
}

/// Accessibility attributes attached to a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AriaProps {
    pub role: AriaRole,
    pub live: AriaLive,
}

/// Colors used by the built-in status icons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconTheme {
    pub primary: String,
    pub secondary: String,
}

/// Opaque presentation properties (property name to value).
///
/// The store never interprets these; it only merges them when resolving
/// defaults, later layers overriding earlier ones key by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<String, String>);

impl Style {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `self` overlaid with `over`.
    #[must_use]
    pub fn merged(&self, over: &Style) -> Style {
        let mut merged = self.clone();
        for (property, value) in &over.0 {
            merged.0.insert(property.clone(), value.clone());
        }
        merged
    }
}

/// Requested lifetime of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    Finite(Duration),
    /// Never auto-dismissed.
    Infinite,
}

impl Lifetime {
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Lifetime::Finite(Duration::from_millis(millis))
    }

    #[must_use]
    pub fn is_infinite(self) -> bool {
        matches!(self, Lifetime::Infinite)
    }
}

/// Time left before a toast must be dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// The toast never expires.
    Unbounded,
    /// The lifetime is used up.
    Expired,
    Remaining(Duration),
}

/// A single toast notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast<M> {
    pub id: ToastId,
    pub kind: ToastType,
    /// Renderable payload, passed through untouched.
    pub message: M,
    /// Cleared on dismissal and never set again by the store itself.
    pub visible: bool,
    pub created_at: Instant,
    /// Cumulative time the countdown was frozen by pauses.
    pub pause_duration: Duration,
    pub duration: Option<Lifetime>,
    /// Rendered height in pixels, reported by the view layer.
    pub height: Option<f32>,
    pub position: Option<ToastPosition>,
    pub aria: AriaProps,
    pub style: Style,
    pub class_name: Option<String>,
    pub icon: Option<M>,
    pub icon_theme: Option<IconTheme>,
}

impl<M> Toast<M> {
    /// Computes the remaining lifetime at `now`.
    ///
    /// Remaining = duration + pause duration - age. A toast without any
    /// duration counts as already expired; a budget too large to represent
    /// never runs out.
    #[must_use]
    pub fn countdown(&self, now: Instant) -> Countdown {
        let duration = match self.duration {
            Some(Lifetime::Infinite) => return Countdown::Unbounded,
            Some(Lifetime::Finite(duration)) => duration,
            None => Duration::ZERO,
        };
        let Some(budget) = duration.checked_add(self.pause_duration) else {
            return Countdown::Unbounded;
        };
        let age = now.saturating_duration_since(self.created_at);
        if age >= budget {
            Countdown::Expired
        } else {
            Countdown::Remaining(budget - age)
        }
    }

    /// Returns the explicit position, or `fallback` if none was requested.
    #[must_use]
    pub fn position_or(&self, fallback: ToastPosition) -> ToastPosition {
        self.position.unwrap_or(fallback)
    }
}

/// Caller-supplied overrides used when creating a toast.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastOptions<M> {
    pub id: Option<ToastId>,
    pub icon: Option<M>,
    pub duration: Option<Lifetime>,
    pub aria: Option<AriaProps>,
    pub class_name: Option<String>,
    pub style: Option<Style>,
    pub position: Option<ToastPosition>,
    pub icon_theme: Option<IconTheme>,
}

impl<M> Default for ToastOptions<M> {
    fn default() -> Self {
        Self {
            id: None,
            icon: None,
            duration: None,
            aria: None,
            class_name: None,
            style: None,
            position: None,
            icon_theme: None,
        }
    }
}

impl<M: Clone> ToastOptions<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<ToastId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: M) -> Self {
        self.icon = Some(icon);
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Lifetime) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn aria(mut self, aria: AriaProps) -> Self {
        self.aria = Some(aria);
        self
    }

    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    #[must_use]
    pub fn position(mut self, position: ToastPosition) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn icon_theme(mut self, icon_theme: IconTheme) -> Self {
        self.icon_theme = Some(icon_theme);
        self
    }

    /// Returns `self` with every field set in `over` replaced.
    #[must_use]
    pub fn merged(&self, over: &ToastOptions<M>) -> ToastOptions<M> {
        ToastOptions {
            id: over.id.clone().or_else(|| self.id.clone()),
            icon: over.icon.clone().or_else(|| self.icon.clone()),
            duration: over.duration.or(self.duration),
            aria: over.aria.or(self.aria),
            class_name: over.class_name.clone().or_else(|| self.class_name.clone()),
            style: over.style.clone().or_else(|| self.style.clone()),
            position: over.position.or(self.position),
            icon_theme: over.icon_theme.clone().or_else(|| self.icon_theme.clone()),
        }
    }
}

/// Global defaults plus per-type overrides applied to every toast of a view.
///
/// Precedence, lowest first: global defaults, type defaults, the toast's own
/// explicit values.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultToastOptions<M> {
    pub base: ToastOptions<M>,
    pub per_type: HashMap<ToastType, ToastOptions<M>>,
}

impl<M> Default for DefaultToastOptions<M> {
    fn default() -> Self {
        Self {
            base: ToastOptions::default(),
            per_type: HashMap::new(),
        }
    }
}

impl<M: Clone> DefaultToastOptions<M> {
    #[must_use]
    pub fn new(base: ToastOptions<M>) -> Self {
        Self {
            base,
            per_type: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, kind: ToastType, options: ToastOptions<M>) -> Self {
        self.per_type.insert(kind, options);
        self
    }

    #[must_use]
    pub fn for_type(&self, kind: ToastType) -> Option<&ToastOptions<M>> {
        self.per_type.get(&kind)
    }

    /// Flattens the global and type-specific options for `kind`.
    #[must_use]
    pub fn options_for(&self, kind: ToastType) -> ToastOptions<M> {
        match self.for_type(kind) {
            Some(typed) => self.base.merged(typed),
            None => self.base.clone(),
        }
    }

    /// Applies these defaults to `toast`, producing the toast a view renders.
    ///
    /// The returned toast always carries a duration.
    #[must_use]
    pub fn resolve(&self, toast: &Toast<M>) -> Toast<M> {
        let typed = self.for_type(toast.kind);
        let mut resolved = toast.clone();

        resolved.duration = Some(
            toast
                .duration
                .or_else(|| typed.and_then(|o| o.duration))
                .or(self.base.duration)
                .unwrap_or_else(|| toast.kind.default_lifetime()),
        );

        let global_style = self.base.style.clone().unwrap_or_default();
        let typed_style = typed.and_then(|o| o.style.clone()).unwrap_or_default();
        resolved.style = global_style.merged(&typed_style).merged(&toast.style);

        if resolved.icon.is_none() {
            resolved.icon = typed
                .and_then(|o| o.icon.clone())
                .or_else(|| self.base.icon.clone());
        }
        if resolved.class_name.is_none() {
            resolved.class_name = typed
                .and_then(|o| o.class_name.clone())
                .or_else(|| self.base.class_name.clone());
        }
        if resolved.position.is_none() {
            resolved.position = typed.and_then(|o| o.position).or(self.base.position);
        }
        if resolved.icon_theme.is_none() {
            resolved.icon_theme = typed
                .and_then(|o| o.icon_theme.clone())
                .or_else(|| self.base.icon_theme.clone());
        }

        resolved
    }
}

/// Partial update of a tracked toast, matched by id.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastPatch<M> {
    pub id: ToastId,
    pub kind: Option<ToastType>,
    pub message: Option<M>,
    pub visible: Option<bool>,
    pub duration: Option<Lifetime>,
    pub height: Option<f32>,
    pub position: Option<ToastPosition>,
    pub aria: Option<AriaProps>,
    pub style: Option<Style>,
    pub class_name: Option<String>,
    pub icon: Option<M>,
    pub icon_theme: Option<IconTheme>,
}

impl<M> ToastPatch<M> {
    #[must_use]
    pub fn new(id: ToastId) -> Self {
        Self {
            id,
            kind: None,
            message: None,
            visible: None,
            duration: None,
            height: None,
            position: None,
            aria: None,
            style: None,
            class_name: None,
            icon: None,
            icon_theme: None,
        }
    }

    #[must_use]
    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn message(mut self, message: M) -> Self {
        self.message = Some(message);
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: ToastType) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Lifetime) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Merges every set field into `toast`.
    pub fn apply(self, toast: &mut Toast<M>) {
        if let Some(kind) = self.kind {
            toast.kind = kind;
        }
        if let Some(message) = self.message {
            toast.message = message;
        }
        if let Some(visible) = self.visible {
            toast.visible = visible;
        }
        if let Some(duration) = self.duration {
            toast.duration = Some(duration);
        }
        if let Some(height) = self.height {
            toast.height = Some(height);
        }
        if let Some(position) = self.position {
            toast.position = Some(position);
        }
        if let Some(aria) = self.aria {
            toast.aria = aria;
        }
        if let Some(style) = self.style {
            toast.style = style;
        }
        if let Some(class_name) = self.class_name {
            toast.class_name = Some(class_name);
        }
        if let Some(icon) = self.icon {
            toast.icon = Some(icon);
        }
        if let Some(icon_theme) = self.icon_theme {
            toast.icon_theme = Some(icon_theme);
        }
    }
}
