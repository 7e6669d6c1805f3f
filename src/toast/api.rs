// SPDX-License-Identifier: MPL-2.0
//! Convenience constructors over the store.
//!
//! Every handler builds a [`Toast`] and dispatches it as an upsert, so
//! passing the id of a tracked toast in the options updates that toast
//! instead of creating a second one.

use super::id::ToastId;
use super::store::{Action, Store};
use super::types::{DefaultToastOptions, Toast, ToastOptions, ToastType};
use std::future::Future;
use std::time::{Duration, Instant};

/// Messages shown by [`Store::promise`] for each stage of the future.
#[derive(Debug, Clone, PartialEq)]
pub struct PromiseMessages<M> {
    pub loading: M,
    pub success: M,
    pub error: M,
}

/// Builds a visible toast created at `now`.
///
/// The explicit id from `options` wins over a generated one.
pub fn create_toast<M>(
    message: M,
    kind: ToastType,
    options: ToastOptions<M>,
    now: Instant,
) -> Toast<M> {
    let ToastOptions {
        id,
        icon,
        duration,
        aria,
        class_name,
        style,
        position,
        icon_theme,
    } = options;

    Toast {
        id: id.unwrap_or_else(ToastId::generate),
        kind,
        message,
        visible: true,
        created_at: now,
        pause_duration: Duration::ZERO,
        duration,
        height: None,
        position,
        aria: aria.unwrap_or_default(),
        style: style.unwrap_or_default(),
        class_name,
        icon,
        icon_theme,
    }
}

impl<M: Clone + Send + Sync + 'static> Store<M> {
    /// Shows a toast of the given type and returns its id.
    pub fn show(&self, kind: ToastType, message: M, options: ToastOptions<M>) -> ToastId {
        let toast = create_toast(message, kind, options, self.now());
        let id = toast.id.clone();
        self.dispatch(Action::UpsertToast(toast));
        id
    }

    /// Shows a blank toast (no status icon).
    pub fn toast(&self, message: M, options: ToastOptions<M>) -> ToastId {
        self.show(ToastType::Blank, message, options)
    }

    pub fn success(&self, message: M, options: ToastOptions<M>) -> ToastId {
        self.show(ToastType::Success, message, options)
    }

    pub fn error(&self, message: M, options: ToastOptions<M>) -> ToastId {
        self.show(ToastType::Error, message, options)
    }

    /// Shows a loading toast. Loading toasts never expire unless given a
    /// duration.
    pub fn loading(&self, message: M, options: ToastOptions<M>) -> ToastId {
        self.show(ToastType::Loading, message, options)
    }

    /// Shows a toast whose message is rendered as-is, without the toast bar.
    pub fn custom(&self, message: M, options: ToastOptions<M>) -> ToastId {
        self.show(ToastType::Custom, message, options)
    }

    /// Hides a toast; it is purged once the grace period elapses.
    /// `None` matches nothing.
    pub fn dismiss(&self, id: Option<&ToastId>) {
        self.dispatch(Action::DismissToast(id.cloned()));
    }

    /// Forgets a toast immediately, skipping the exit grace period.
    /// `None` matches nothing.
    pub fn remove(&self, id: Option<&ToastId>) {
        self.dispatch(Action::RemoveToast(id.cloned()));
    }

    /// Tracks `future` with a single toast.
    ///
    /// A loading toast is shown right away. When the returned future is
    /// driven to completion the same toast turns into a success or error
    /// toast, and the original result is handed back untouched, errors
    /// included.
    ///
    /// The future is lazy. Dropping it before it settles dismisses the
    /// loading toast, which would otherwise never expire.
    #[must_use = "the loading toast only settles when the future is awaited"]
    pub fn promise<F, T, E>(
        &self,
        future: F,
        messages: PromiseMessages<M>,
        options: DefaultToastOptions<M>,
    ) -> impl Future<Output = Result<T, E>> + Send
    where
        F: Future<Output = Result<T, E>> + Send,
        T: Send,
        E: Send,
    {
        let PromiseMessages {
            loading,
            success,
            error,
        } = messages;
        let id = self.loading(loading, options.options_for(ToastType::Loading));
        let store = self.clone();
        let abandoned = DismissOnDrop {
            store: self.clone(),
            id: Some(id.clone()),
        };

        async move {
            let outcome = future.await;
            abandoned.disarm();
            let (kind, message) = match &outcome {
                Ok(_) => (ToastType::Success, success),
                Err(_) => (ToastType::Error, error),
            };
            tracing::debug!(%id, ?kind, "tracked future settled");

            let mut settled = options.options_for(kind);
            settled.id = Some(id);
            store.show(kind, message, settled);
            outcome
        }
    }
}

/// Dismisses a promise's loading toast if its future is dropped unsettled.
struct DismissOnDrop<M: Clone + Send + Sync + 'static> {
    store: Store<M>,
    id: Option<ToastId>,
}

impl<M: Clone + Send + Sync + 'static> DismissOnDrop<M> {
    fn disarm(mut self) {
        self.id = None;
    }
}

impl<M: Clone + Send + Sync + 'static> Drop for DismissOnDrop<M> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            tracing::debug!(%id, "tracked future dropped before settling");
            self.store.dismiss(Some(&id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::scheduler::ManualScheduler;
    use crate::toast::types::{AriaLive, AriaRole, Lifetime, ToastPosition};
    use std::sync::Arc;

    fn new_store() -> Store<String> {
        Store::new(Arc::new(ManualScheduler::new()))
    }

    fn messages() -> PromiseMessages<String> {
        PromiseMessages {
            loading: "Saving".to_string(),
            success: "Saved".to_string(),
            error: "Failed".to_string(),
        }
    }

    #[test]
    fn create_toast_sets_defaults() {
        let now = Instant::now();
        let toast = create_toast("hi", ToastType::Blank, ToastOptions::new(), now);

        assert!(toast.visible);
        assert_eq!(toast.created_at, now);
        assert_eq!(toast.pause_duration, Duration::ZERO);
        assert_eq!(toast.aria.role, AriaRole::Status);
        assert_eq!(toast.aria.live, AriaLive::Polite);
        assert!(toast.height.is_none());
        assert!(!toast.id.as_str().is_empty());
    }

    #[test]
    fn create_toast_applies_overrides_and_explicit_id() {
        let toast = create_toast(
            "hi",
            ToastType::Error,
            ToastOptions::new()
                .id("fixed")
                .position(ToastPosition::BottomLeft)
                .duration(Lifetime::from_millis(10)),
            Instant::now(),
        );

        assert_eq!(toast.id.as_str(), "fixed");
        assert_eq!(toast.position, Some(ToastPosition::BottomLeft));
        assert_eq!(toast.duration, Some(Lifetime::from_millis(10)));
    }

    #[test]
    fn handlers_set_matching_type() {
        let store = new_store();
        let cases = [
            (store.toast("a".into(), ToastOptions::new()), ToastType::Blank),
            (store.success("b".into(), ToastOptions::new()), ToastType::Success),
            (store.error("c".into(), ToastOptions::new()), ToastType::Error),
            (store.loading("d".into(), ToastOptions::new()), ToastType::Loading),
            (store.custom("e".into(), ToastOptions::new()), ToastType::Custom),
        ];

        let state = store.state();
        for (id, kind) in cases {
            assert_eq!(state.get(&id).map(|t| t.kind), Some(kind));
        }
    }

    #[test]
    fn explicit_existing_id_updates_instead_of_duplicating() {
        let store = new_store();
        let id = store.loading("Uploading".into(), ToastOptions::new());
        store.success("Uploaded".into(), ToastOptions::new().id(id.clone()));

        let state = store.state();
        assert_eq!(state.len(), 1);
        assert_eq!(state.toasts[0].kind, ToastType::Success);
        assert_eq!(state.toasts[0].message, "Uploaded");
    }

    #[test]
    fn remove_skips_grace_period() {
        let store = new_store();
        let id = store.toast("bye".into(), ToastOptions::new());
        store.remove(Some(&id));
        assert!(store.state().is_empty());
    }

    #[test]
    fn dismiss_keeps_toast_tracked() {
        let store = new_store();
        let id = store.toast("bye".into(), ToastOptions::new());
        store.dismiss(Some(&id));

        let state = store.state();
        assert_eq!(state.len(), 1);
        assert!(!state.toasts[0].visible);
    }

    #[tokio::test]
    async fn promise_success_transitions_same_toast() {
        let store = new_store();
        let tracked = store.promise(
            async { Ok::<u32, String>(7) },
            messages(),
            DefaultToastOptions::default(),
        );

        let state = store.state();
        assert_eq!(state.len(), 1);
        assert_eq!(state.toasts[0].kind, ToastType::Loading);
        let id = state.toasts[0].id.clone();

        assert_eq!(tracked.await, Ok(7));

        let state = store.state();
        assert_eq!(state.len(), 1);
        assert_eq!(state.toasts[0].id, id);
        assert_eq!(state.toasts[0].kind, ToastType::Success);
        assert_eq!(state.toasts[0].message, "Saved");
    }

    #[test]
    fn dropping_an_unsettled_promise_dismisses_its_toast() {
        let store = new_store();
        let tracked = store.promise(
            std::future::pending::<Result<(), ()>>(),
            messages(),
            DefaultToastOptions::default(),
        );
        let id = store.state().toasts[0].id.clone();
        assert!(store.state().get(&id).is_some_and(|t| t.visible));

        drop(tracked);

        let state = store.state();
        let toast = state.get(&id).expect("loading toast is still tracked");
        assert_eq!(toast.kind, ToastType::Loading);
        assert!(!toast.visible);
    }

    #[tokio::test]
    async fn promise_error_is_still_returned() {
        let store = new_store();
        let result = store
            .promise(
                async { Err::<(), String>("disk full".to_string()) },
                messages(),
                DefaultToastOptions::default(),
            )
            .await;

        assert_eq!(result, Err("disk full".to_string()));
        let state = store.state();
        assert_eq!(state.len(), 1);
        assert_eq!(state.toasts[0].kind, ToastType::Error);
        assert_eq!(state.toasts[0].message, "Failed");
    }

    #[tokio::test]
    async fn promise_applies_per_status_overrides() {
        let store = new_store();
        let options = DefaultToastOptions::new(ToastOptions::new().class_name("tracked"))
            .with_type(
                ToastType::Success,
                ToastOptions::new().duration(Lifetime::from_millis(5000)),
            );

        store
            .promise(async { Ok::<(), ()>(()) }, messages(), options)
            .await
            .expect("future succeeds");

        let toast = &store.state().toasts[0];
        assert_eq!(toast.class_name.as_deref(), Some("tracked"));
        assert_eq!(toast.duration, Some(Lifetime::from_millis(5000)));
    }
}
