// SPDX-License-Identifier: MPL-2.0
use iced_toast::config::{self, Config, ToastDefaults, ToasterConfig};
use iced_toast::toast::{
    calculate_offset, Action, DefaultToastOptions, Lifetime, ManualScheduler, PromiseMessages,
    Store, ToastOptions, ToastPosition, ToastType, Toaster, TokioScheduler,
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

fn manual_store() -> (Arc<ManualScheduler>, Store<String>) {
    let scheduler = Arc::new(ManualScheduler::new());
    let store = Store::new(scheduler.clone());
    (scheduler, store)
}

#[test]
fn full_lifecycle_from_show_to_purge() {
    let (scheduler, store) = manual_store();
    let toaster = Toaster::mount(&store, Default::default());

    let id = store.toast("Image saved".to_string(), ToastOptions::new());
    toaster.update_height(&id, 40.0);

    // Blank toasts live 4 s, then linger 1 s invisible before the purge.
    scheduler.advance(Duration::from_millis(4000));
    let state = store.state();
    assert_eq!(state.len(), 1);
    assert!(!state.toasts[0].visible);
    assert_eq!(store.pending_removals(), 1);

    scheduler.advance(Duration::from_millis(1000));
    assert!(store.state().is_empty());
    assert!(!toaster.has_toasts());
}

#[test]
fn hover_pause_delays_expiry_by_paused_time() {
    let (scheduler, store) = manual_store();
    let toaster = Toaster::mount(&store, Default::default());
    let id = store.error("Disk full".to_string(), ToastOptions::new());

    scheduler.advance(Duration::from_millis(1000));
    toaster.start_pause();
    scheduler.advance(Duration::from_millis(10_000));
    toaster.end_pause();

    scheduler.advance(Duration::from_millis(2999));
    assert!(store.state().get(&id).is_some_and(|t| t.visible));
    scheduler.advance(Duration::from_millis(1));
    assert!(store.state().get(&id).is_some_and(|t| !t.visible));
}

#[test]
fn stacking_offsets_follow_measured_heights() {
    let (_scheduler, store) = manual_store();
    let toaster = Toaster::mount(&store, Default::default());

    let ids: Vec<_> = ["c", "b", "a"]
        .into_iter()
        .map(|label| store.toast(label.to_string(), ToastOptions::new()))
        .collect();
    for (id, height) in ids.iter().rev().zip([40.0, 60.0, 50.0]) {
        toaster.update_height(id, height);
    }

    let offsets: Vec<f32> = toaster.layout().iter().map(|layout| layout.offset).collect();
    assert_eq!(offsets, vec![0.0, 48.0, 116.0]);

    let toasts = toaster.toasts();
    let reverse = toaster.options().offset_options();
    let reverse = iced_toast::toast::OffsetOptions {
        reverse_order: true,
        ..reverse
    };
    let reversed: Vec<f32> = toasts
        .iter()
        .map(|toast| calculate_offset(&toasts, toast, &reverse))
        .collect();
    assert_eq!(reversed, vec![126.0, 58.0, 0.0]);
}

#[test]
fn positions_stack_independently() {
    let (_scheduler, store) = manual_store();
    let toaster = Toaster::mount(&store, Default::default());

    let top = store.toast("top".to_string(), ToastOptions::new());
    let bottom = store.toast(
        "bottom".to_string(),
        ToastOptions::new().position(ToastPosition::BottomLeft),
    );
    toaster.update_height(&top, 40.0);
    toaster.update_height(&bottom, 40.0);

    for layout in toaster.layout() {
        assert_eq!(layout.offset, 0.0);
    }
}

#[test]
fn configured_defaults_reach_the_toaster() {
    let dir = tempdir().expect("failed to create temp dir");
    let config = Config {
        toaster: ToasterConfig {
            position: Some(ToastPosition::BottomCenter),
            ..ToasterConfig::default()
        },
        success: Some(ToastDefaults {
            duration_ms: Some(500),
            ..ToastDefaults::default()
        }),
        ..Config::default()
    };
    config::save_with_override(&config, Some(dir.path().to_path_buf()))
        .expect("failed to save config");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());

    let (scheduler, store) = manual_store();
    let toaster = Toaster::mount(&store, loaded.toaster_options());
    let id = store.success("Done".to_string(), ToastOptions::new());

    let layout = toaster.layout();
    assert_eq!(layout[0].position, ToastPosition::BottomCenter);
    assert_eq!(layout[0].toast.duration, Some(Lifetime::from_millis(500)));

    scheduler.advance(Duration::from_millis(500));
    assert!(store.state().get(&id).is_some_and(|t| !t.visible));
}

#[test]
fn capacity_holds_through_the_public_api() {
    let (_scheduler, store) = manual_store();
    for i in 0..50 {
        store.toast(format!("toast {i}"), ToastOptions::new());
    }
    assert_eq!(store.state().len(), 20);
    assert_eq!(store.state().toasts[0].message, "toast 49");
}

#[test]
fn raw_actions_and_facade_agree() {
    let (_scheduler, store) = manual_store();
    let id = store.loading("Working".to_string(), ToastOptions::new().id("job"));
    store.dispatch(Action::DismissToast(Some(id.clone())));
    store.dispatch(Action::RemoveToast(Some(id)));
    assert!(store.state().is_empty());
    assert_eq!(store.pending_removals(), 1);
}

#[tokio::test]
async fn tokio_scheduler_drives_real_timers() {
    let scheduler = Arc::new(TokioScheduler::current().expect("inside runtime"));
    let store: Store<String> = Store::new(scheduler);
    let _toaster = Toaster::mount(&store, Default::default());

    let id = store.show(
        ToastType::Blank,
        "quick".to_string(),
        ToastOptions::new().duration(Lifetime::from_millis(20)),
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(store.state().get(&id).is_some_and(|t| !t.visible));
}

#[tokio::test]
async fn promise_with_toaster_keeps_single_toast() {
    let (scheduler, store) = manual_store();
    let toaster = Toaster::mount(&store, Default::default());

    let result = store
        .promise(
            async {
                tokio::task::yield_now().await;
                Err::<u8, &str>("offline")
            },
            PromiseMessages {
                loading: "Syncing".to_string(),
                success: "Synced".to_string(),
                error: "Sync failed".to_string(),
            },
            DefaultToastOptions::default(),
        )
        .await;

    assert_eq!(result, Err("offline"));
    let toasts = toaster.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastType::Error);

    scheduler.advance(Duration::from_millis(4000));
    assert!(store.state().toasts.iter().all(|t| !t.visible));
}
