// SPDX-License-Identifier: MPL-2.0
//! Toast store: canonical toast list, reducer and listener registry.
//!
//! The [`Store`] owns the list of tracked toasts and the pause timestamp.
//! State only changes through [`Store::dispatch`], which applies an
//! [`Action`] with the pure [`reduce`] function, performs the removal-queue
//! [`Effect`] it asks for, then pushes the new state to every subscribed
//! listener.
//!
//! # Removal queue
//!
//! Dismissed toasts stay tracked (invisible) for
//! [`TOAST_EXPIRE_DISMISS_DELAY`] so views can animate them out, then a
//! timer purges them. At most one purge timer exists per id; (re)inserting
//! a toast cancels a pending purge for its id.

use super::id::ToastId;
use super::scheduler::{Scheduler, TimerHandle};
use super::types::{Toast, ToastPatch};
use crate::config::defaults::{TOAST_EXPIRE_DISMISS_DELAY, TOAST_LIMIT};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Instant;

/// State transitions understood by the reducer.
#[derive(Debug, Clone)]
pub enum Action<M> {
    /// Insert at the front, evicting the oldest toast when full.
    AddToast(Toast<M>),
    /// Replace the toast with the same id in place, or add it.
    UpsertToast(Toast<M>),
    /// Merge fields into the toast with the patch's id.
    UpdateToast(ToastPatch<M>),
    /// Hide a toast; it is purged after the grace period.
    DismissToast(Option<ToastId>),
    /// Forget a toast immediately.
    RemoveToast(Option<ToastId>),
    StartPause(Instant),
    EndPause(Instant),
}

impl<M> Action<M> {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddToast(_) => "add",
            Action::UpsertToast(_) => "upsert",
            Action::UpdateToast(_) => "update",
            Action::DismissToast(_) => "dismiss",
            Action::RemoveToast(_) => "remove",
            Action::StartPause(_) => "start-pause",
            Action::EndPause(_) => "end-pause",
        }
    }
}

/// Removal-queue work requested by a reducer step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ArmRemoval(ToastId),
    CancelRemoval(ToastId),
}

/// Snapshot of the tracked toasts (most recent first) and pause state.
#[derive(Debug, Clone, PartialEq)]
pub struct State<M> {
    pub toasts: Vec<Toast<M>>,
    pub paused_at: Option<Instant>,
}

impl<M> Default for State<M> {
    fn default() -> Self {
        Self {
            toasts: Vec::new(),
            paused_at: None,
        }
    }
}

impl<M> State<M> {
    #[must_use]
    pub fn get(&self, id: &ToastId) -> Option<&Toast<M>> {
        self.toasts.iter().find(|toast| &toast.id == id)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    fn index_of(&self, id: Option<&ToastId>) -> Option<usize> {
        let id = id?;
        self.toasts.iter().position(|toast| &toast.id == id)
    }

    fn insert_front(&mut self, toast: Toast<M>) {
        if self.toasts.len() >= TOAST_LIMIT {
            self.toasts.truncate(TOAST_LIMIT - 1);
        }
        self.toasts.insert(0, toast);
    }
}

/// Applies `action` to `state`.
///
/// Unknown or absent ids make `UpdateToast`, `DismissToast` and
/// `RemoveToast` no-ops. The returned effect must be applied to the
/// removal queue by the caller.
pub fn reduce<M>(state: &mut State<M>, action: Action<M>) -> Option<Effect> {
    match action {
        Action::AddToast(toast) => {
            let id = toast.id.clone();
            state.insert_front(toast);
            Some(Effect::CancelRemoval(id))
        }
        Action::UpsertToast(toast) => {
            let id = toast.id.clone();
            match state.index_of(Some(&id)) {
                Some(index) => state.toasts[index] = toast,
                None => state.insert_front(toast),
            }
            Some(Effect::CancelRemoval(id))
        }
        Action::UpdateToast(patch) => {
            if let Some(index) = state.index_of(Some(&patch.id)) {
                patch.apply(&mut state.toasts[index]);
            }
            None
        }
        Action::DismissToast(id) => {
            let index = state.index_of(id.as_ref())?;
            let toast = &mut state.toasts[index];
            toast.visible = false;
            Some(Effect::ArmRemoval(toast.id.clone()))
        }
        Action::RemoveToast(id) => {
            if let Some(index) = state.index_of(id.as_ref()) {
                state.toasts.remove(index);
            }
            None
        }
        Action::StartPause(at) => {
            state.paused_at = Some(at);
            None
        }
        Action::EndPause(at) => {
            if let Some(paused_at) = state.paused_at.take() {
                let paused_for = at.saturating_duration_since(paused_at);
                for toast in &mut state.toasts {
                    toast.pause_duration += paused_for;
                }
            }
            None
        }
    }
}

type Listener<M> = Arc<dyn Fn(&State<M>) + Send + Sync>;

struct Inner<M> {
    state: Mutex<State<M>>,
    listeners: Mutex<Vec<(u64, Listener<M>)>>,
    next_listener: AtomicU64,
    removals: Mutex<HashMap<ToastId, TimerHandle>>,
    scheduler: Arc<dyn Scheduler>,
}

/// Shared toast store. Cloning yields another handle to the same store.
pub struct Store<M> {
    inner: Arc<Inner<M>>,
}

impl<M> Clone for Store<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M> fmt::Debug for Store<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("toasts", &self.inner.state.lock().toasts.len())
            .field("listeners", &self.inner.listeners.lock().len())
            .field("pending_removals", &self.inner.removals.lock().len())
            .finish()
    }
}

/// Non-owning handle to a [`Store`], held by timers and listeners.
pub struct WeakStore<M> {
    inner: Weak<Inner<M>>,
}

impl<M> Clone for WeakStore<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<M> WeakStore<M> {
    #[must_use]
    pub fn upgrade(&self) -> Option<Store<M>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl<M: Clone + Send + Sync + 'static> Store<M> {
    /// Creates an empty store whose timers run on `scheduler`.
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State::default()),
                listeners: Mutex::new(Vec::new()),
                next_listener: AtomicU64::new(0),
                removals: Mutex::new(HashMap::new()),
                scheduler,
            }),
        }
    }

    #[must_use]
    pub fn now(&self) -> Instant {
        self.inner.scheduler.now()
    }

    #[must_use]
    pub fn scheduler(&self) -> &Arc<dyn Scheduler> {
        &self.inner.scheduler
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> State<M> {
        self.inner.state.lock().clone()
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakStore<M> {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Applies `action` and notifies every listener.
    ///
    /// No lock is held while listeners run, so they may dispatch again.
    pub fn dispatch(&self, action: Action<M>) {
        let name = action.name();
        let (effect, tracked) = {
            let mut state = self.inner.state.lock();
            let effect = reduce(&mut state, action);
            (effect, state.toasts.len())
        };
        tracing::debug!(action = name, tracked, "toast store dispatch");

        match effect {
            Some(Effect::ArmRemoval(id)) => self.arm_removal(id),
            Some(Effect::CancelRemoval(id)) => self.cancel_removal(&id),
            None => {}
        }

        self.notify();
    }

    /// Registers `listener`, called after every dispatch with the current
    /// state. The listener stays registered until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&State<M>) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push((id, Arc::new(listener)));

        let inner = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.listeners.lock().retain(|(listener, _)| *listener != id);
            }
        })
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// Number of dismissed toasts waiting for their purge.
    #[must_use]
    pub fn pending_removals(&self) -> usize {
        self.inner.removals.lock().len()
    }

    /// Empties the store and cancels pending purges. Listeners stay
    /// registered and are notified of the empty state.
    pub fn reset(&self) {
        for (_, timer) in self.inner.removals.lock().drain() {
            timer.cancel();
        }
        *self.inner.state.lock() = State::default();
        tracing::debug!("toast store reset");
        self.notify();
    }

    fn notify(&self) {
        let listeners: Vec<Listener<M>> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            // Re-read per listener: an earlier listener may have dispatched.
            let state = self.state();
            listener(&state);
        }
    }

    fn arm_removal(&self, id: ToastId) {
        let mut removals = self.inner.removals.lock();
        if removals.contains_key(&id) {
            return;
        }

        let store = self.downgrade();
        let key = id.clone();
        let timer = self.inner.scheduler.schedule(
            TOAST_EXPIRE_DISMISS_DELAY,
            Box::new(move || {
                if let Some(store) = store.upgrade() {
                    store.inner.removals.lock().remove(&key);
                    tracing::debug!(id = %key, "purging dismissed toast");
                    store.dispatch(Action::RemoveToast(Some(key)));
                }
            }),
        );
        removals.insert(id, timer);
    }

    fn cancel_removal(&self, id: &ToastId) {
        if let Some(timer) = self.inner.removals.lock().remove(id) {
            timer.cancel();
        }
    }
}

/// Keeps a store listener registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
