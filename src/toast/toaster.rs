// SPDX-License-Identifier: MPL-2.0
//! Per-view toast logic.
//!
//! A [`Toaster`] is mounted once per rendered toast container. It subscribes
//! to the store, resolves every toast against the view's default options,
//! keeps one auto-dismiss timer per visible toast, and computes where each
//! toast sits in its stack.
//!
//! Timers belong to the view: they are all cancelled and re-derived on every
//! store notification, and dropping the `Toaster` cancels them. Purge timers
//! for dismissed toasts belong to the store and outlive the view.

use super::id::ToastId;
use super::scheduler::TimerHandle;
use super::store::{Action, State, Store, Subscription};
use super::types::{Countdown, DefaultToastOptions, Style, Toast, ToastPatch, ToastPosition};
use crate::config::defaults::{DEFAULT_CONTAINER_OFFSET, DEFAULT_GUTTER, PLACEMENT_TRANSITION};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Configuration of a mounted toaster.
#[derive(Debug, Clone)]
pub struct ToasterOptions<M> {
    /// Position of toasts that do not request one.
    pub position: ToastPosition,
    /// Stack newer toasts after older ones instead of before.
    pub reverse_order: bool,
    /// Spacing between stacked toasts, in pixels.
    pub gutter: f32,
    pub toast_options: DefaultToastOptions<M>,
    /// Style of the overlay container (`background`, `color`).
    pub container_style: Style,
    /// Distance between the container and the window edges, in pixels.
    pub container_offset: f32,
    /// Disable the placement transition.
    pub reduce_motion: bool,
}

impl<M> Default for ToasterOptions<M> {
    fn default() -> Self {
        Self {
            position: ToastPosition::default(),
            reverse_order: false,
            gutter: DEFAULT_GUTTER,
            toast_options: DefaultToastOptions::default(),
            container_style: Style::default(),
            container_offset: DEFAULT_CONTAINER_OFFSET,
            reduce_motion: false,
        }
    }
}

impl<M> ToasterOptions<M> {
    #[must_use]
    pub fn position(mut self, position: ToastPosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn reverse_order(mut self, reverse_order: bool) -> Self {
        self.reverse_order = reverse_order;
        self
    }

    #[must_use]
    pub fn gutter(mut self, gutter: f32) -> Self {
        self.gutter = gutter;
        self
    }

    #[must_use]
    pub fn toast_options(mut self, toast_options: DefaultToastOptions<M>) -> Self {
        self.toast_options = toast_options;
        self
    }

    #[must_use]
    pub fn container_style(mut self, container_style: Style) -> Self {
        self.container_style = container_style;
        self
    }

    #[must_use]
    pub fn offset_options(&self) -> OffsetOptions {
        OffsetOptions {
            reverse_order: self.reverse_order,
            gutter: self.gutter,
            default_position: self.position,
        }
    }
}

/// Parameters of [`calculate_offset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetOptions {
    pub reverse_order: bool,
    pub gutter: f32,
    pub default_position: ToastPosition,
}

impl Default for OffsetOptions {
    fn default() -> Self {
        Self {
            reverse_order: false,
            gutter: DEFAULT_GUTTER,
            default_position: ToastPosition::default(),
        }
    }
}

/// Pixel offset of `toast` within the stack of toasts sharing its position.
///
/// Only toasts with a measured, non-zero height take part. Forward order
/// sums `height + gutter` over the visible toasts before this one; reverse
/// order sums over the visible toasts from index `toasts_before + 1` on.
#[must_use]
pub fn calculate_offset<M>(toasts: &[Toast<M>], toast: &Toast<M>, options: &OffsetOptions) -> f32 {
    let position = toast.position_or(options.default_position);
    let relevant: Vec<&Toast<M>> = toasts
        .iter()
        .filter(|t| {
            t.position_or(options.default_position) == position
                && t.height.is_some_and(|height| height != 0.0)
        })
        .collect();

    let toasts_before = relevant
        .iter()
        .position(|t| t.id == toast.id)
        .map_or(0, |index| relevant[..index].iter().filter(|t| t.visible).count());

    let visible = relevant
        .iter()
        .filter(|t| t.visible)
        .map(|t| t.height.unwrap_or(0.0) + options.gutter);
    if options.reverse_order {
        visible.skip(toasts_before + 1).sum()
    } else {
        visible.take(toasts_before).sum()
    }
}

/// Edge a stack is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Bottom,
}

/// Horizontal alignment of a toast within the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Start,
    Center,
    End,
}

/// Where and how to draw a toast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub anchor: VerticalAnchor,
    pub justify: Justify,
    /// Vertical displacement from the anchor edge; negative moves up.
    pub translate_y: f32,
    pub transition: Option<Duration>,
}

impl Placement {
    #[must_use]
    pub fn new(position: ToastPosition, offset: f32, reduce_motion: bool) -> Self {
        let top = position.is_top();
        let justify = if position.is_center() {
            Justify::Center
        } else if position.is_right() {
            Justify::End
        } else {
            Justify::Start
        };

        Self {
            anchor: if top {
                VerticalAnchor::Top
            } else {
                VerticalAnchor::Bottom
            },
            justify,
            translate_y: if top { offset } else { -offset },
            transition: (!reduce_motion).then_some(PLACEMENT_TRANSITION),
        }
    }
}

/// A resolved toast with everything needed to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastLayout<M> {
    pub toast: Toast<M>,
    pub position: ToastPosition,
    pub offset: f32,
    pub placement: Placement,
    /// Visible toasts are drawn on top and receive pointer input.
    pub active: bool,
}

struct View<M> {
    toasts: Vec<Toast<M>>,
    paused_at: Option<Instant>,
    timers: Vec<TimerHandle>,
}

impl<M> Default for View<M> {
    fn default() -> Self {
        Self {
            toasts: Vec::new(),
            paused_at: None,
            timers: Vec::new(),
        }
    }
}

/// View-model of one mounted toast container.
pub struct Toaster<M> {
    store: Store<M>,
    options: Arc<ToasterOptions<M>>,
    view: Arc<Mutex<View<M>>>,
    subscription: Option<Subscription>,
}

impl<M: Clone + Send + Sync + 'static> Toaster<M> {
    /// Subscribes to `store` and arms timers for the toasts already tracked.
    pub fn mount(store: &Store<M>, options: ToasterOptions<M>) -> Self {
        let options = Arc::new(options);
        let view = Arc::new(Mutex::new(View::default()));

        let subscription = {
            let weak_store = store.downgrade();
            let weak_view = Arc::downgrade(&view);
            let options = Arc::clone(&options);
            store.subscribe(move |state: &State<M>| {
                let (Some(store), Some(view)) = (weak_store.upgrade(), weak_view.upgrade()) else {
                    return;
                };
                sync(&store, &view, &options.toast_options, state);
            })
        };

        sync(store, &view, &options.toast_options, &store.state());

        Self {
            store: store.clone(),
            options,
            view,
            subscription: Some(subscription),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Store<M> {
        &self.store
    }

    #[must_use]
    pub fn options(&self) -> &ToasterOptions<M> {
        &self.options
    }

    /// Tracked toasts with the view's defaults applied, most recent first.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast<M>> {
        self.view.lock().toasts.clone()
    }

    #[must_use]
    pub fn has_toasts(&self) -> bool {
        !self.view.lock().toasts.is_empty()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.view.lock().paused_at.is_some()
    }

    /// Number of auto-dismiss timers currently armed by this view.
    #[must_use]
    pub fn armed_timers(&self) -> usize {
        self.view.lock().timers.len()
    }

    /// Freezes every countdown (pointer entered the container).
    pub fn start_pause(&self) {
        self.store.dispatch(Action::StartPause(self.store.now()));
    }

    /// Resumes the countdowns. Does nothing if not paused.
    pub fn end_pause(&self) {
        if self.is_paused() {
            self.store.dispatch(Action::EndPause(self.store.now()));
        }
    }

    /// Records the rendered height of a toast.
    pub fn update_height(&self, id: &ToastId, height: f32) {
        self.store
            .dispatch(Action::UpdateToast(ToastPatch::new(id.clone()).height(height)));
    }

    #[must_use]
    pub fn calculate_offset(&self, toast: &Toast<M>) -> f32 {
        let view = self.view.lock();
        calculate_offset(&view.toasts, toast, &self.options.offset_options())
    }

    /// Positions every tracked toast, most recent first.
    #[must_use]
    pub fn layout(&self) -> Vec<ToastLayout<M>> {
        let view = self.view.lock();
        let offsets = self.options.offset_options();
        view.toasts
            .iter()
            .map(|toast| {
                let position = toast.position_or(self.options.position);
                let offset = calculate_offset(&view.toasts, toast, &offsets);
                ToastLayout {
                    toast: toast.clone(),
                    position,
                    offset,
                    placement: Placement::new(position, offset, self.options.reduce_motion),
                    active: toast.visible,
                }
            })
            .collect()
    }
}

/// Re-derives the view from `state`: cancels stale timers, then arms one
/// timer per visible finite toast unless paused. Toasts already past their
/// lifetime are dismissed once the view lock is released.
fn sync<M: Clone + Send + Sync + 'static>(
    store: &Store<M>,
    view: &Mutex<View<M>>,
    defaults: &DefaultToastOptions<M>,
    state: &State<M>,
) {
    let expired = {
        let mut view = view.lock();
        for timer in view.timers.drain(..) {
            timer.cancel();
        }
        view.toasts = state.toasts.iter().map(|t| defaults.resolve(t)).collect();
        view.paused_at = state.paused_at;
        if view.paused_at.is_some() {
            return;
        }

        let now = store.now();
        let mut expired = Vec::new();
        let mut timers = Vec::new();
        for toast in view.toasts.iter().filter(|t| t.visible) {
            match toast.countdown(now) {
                Countdown::Unbounded => {}
                Countdown::Expired => expired.push(toast.id.clone()),
                Countdown::Remaining(left) => {
                    let store_ref = store.downgrade();
                    let id = toast.id.clone();
                    timers.push(store.scheduler().schedule(
                        left,
                        Box::new(move || {
                            if let Some(store) = store_ref.upgrade() {
                                store.dismiss(Some(&id));
                            }
                        }),
                    ));
                }
            }
        }
        view.timers = timers;
        expired
    };

    for id in expired {
        tracing::debug!(%id, "toast lifetime elapsed, dismissing");
        store.dismiss(Some(&id));
    }
}

impl<M> Drop for Toaster<M> {
    fn drop(&mut self) {
        drop(self.subscription.take());
        for timer in self.view.lock().timers.drain(..) {
            timer.cancel();
        }
    }
}
