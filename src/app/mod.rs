// SPDX-License-Identifier: MPL-2.0
//! Demo application: a playground window exercising every toast call.
//!
//! The `App` owns one store and one mounted toaster. Toast timers run on a
//! [`ManualScheduler`] that the update loop advances to the current time on
//! every message, so timer callbacks always run on the UI thread and the
//! view is redrawn right after they fire.

mod message;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::config;
use crate::toast::{
    DefaultToastOptions, ManualScheduler, PromiseMessages, Store, ToastOptions, ToastType, Toaster,
};
use crate::ui;
use iced::{Element, Subscription, Task, Theme};
use rand::Rng;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long the simulated upload tracked by the promise toast takes.
const PROMISE_DELAY: Duration = Duration::from_millis(2500);

/// Probability that the simulated upload succeeds.
const PROMISE_SUCCESS_RATE: f64 = 0.7;

/// Root iced application state.
pub struct App {
    scheduler: Arc<ManualScheduler>,
    store: Store<String>,
    toaster: Toaster<String>,
    /// Number of toasts shown so far, used to label them.
    shown: u64,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("store", &self.store)
            .field("scheduler", &self.scheduler)
            .field("shown", &self.shown)
            .finish()
    }
}

/// Launches the demo window.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an `Fn` boot function; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || App::new(boot_state.borrow_mut().take().unwrap_or_default());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window_size((720.0, 480.0))
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = match &flags.config_path {
            Some(path) => config::load_or_default(path),
            None => config::load(),
        };

        let mut options = config.toaster_options::<String>();
        if let Some(position) = flags.position {
            options.position = position;
        }
        if flags.reverse_order {
            options.reverse_order = true;
        }
        tracing::info!(position = %options.position, reverse = options.reverse_order, "mounting toaster");

        let scheduler = Arc::new(ManualScheduler::new());
        let store = Store::new(scheduler.clone());
        let toaster = Toaster::mount(&store, options);

        let app = App {
            scheduler,
            store,
            toaster,
            shown: 0,
        };
        if let Some(warning) = config_warning {
            app.store
                .error(format!("Config ignored: {warning}"), ToastOptions::new());
        }
        (app, Task::none())
    }

    fn title(&self) -> String {
        "Iced Toast".to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_tick_subscription(self.toaster.has_toasts())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let now = match &message {
            Message::Tick(at) => *at,
            _ => Instant::now(),
        };
        self.scheduler.advance_to(now);

        match message {
            Message::Show(kind) => {
                self.shown += 1;
                self.store
                    .show(kind, sample_message(kind, self.shown), ToastOptions::new());
                Task::none()
            }
            Message::ShowPromise => self.start_upload(),
            Message::PromiseSettled(succeeded) => {
                tracing::debug!(succeeded, "simulated upload settled");
                Task::none()
            }
            Message::DismissAll => {
                // Hovered toasts vanish without an exit event.
                self.toaster.end_pause();
                for toast in self.store.state().toasts {
                    self.store.dismiss(Some(&toast.id));
                }
                Task::none()
            }
            Message::ClearAll => {
                self.store.reset();
                Task::none()
            }
            Message::Toaster(message) => {
                ui::toaster::update(&self.toaster, &message);
                Task::none()
            }
            Message::Tick(_) => Task::none(),
        }
    }

    fn start_upload(&self) -> Task<Message> {
        let succeeds = rand::thread_rng().gen_bool(PROMISE_SUCCESS_RATE);
        let upload = async move {
            tokio::time::sleep(PROMISE_DELAY).await;
            if succeeds {
                Ok(())
            } else {
                Err(())
            }
        };

        let tracked = self.store.promise(
            upload,
            PromiseMessages {
                loading: "Uploading...".to_string(),
                success: "Upload complete".to_string(),
                error: "Upload failed".to_string(),
            },
            DefaultToastOptions::default(),
        );
        Task::perform(tracked, |result| Message::PromiseSettled(result.is_ok()))
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(&self.toaster)
    }
}

fn sample_message(kind: ToastType, n: u64) -> String {
    match kind {
        ToastType::Blank => format!("Notification #{n}"),
        ToastType::Success => format!("Saved item #{n}"),
        ToastType::Error => format!("Could not save item #{n}"),
        ToastType::Loading => format!("Working on item #{n}..."),
        ToastType::Custom => format!("Custom content #{n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::ToastPosition;
    use std::fs;
    use tempfile::tempdir;

    fn app_with(flags: Flags) -> App {
        App::new(flags).0
    }

    fn isolated_flags() -> (tempfile::TempDir, Flags) {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let flags = Flags {
            config_path: Some(temp_dir.path().join("toaster.toml")),
            ..Flags::default()
        };
        (temp_dir, flags)
    }

    #[test]
    fn show_adds_toast_of_requested_type() {
        let (_dir, flags) = isolated_flags();
        let mut app = app_with(flags);

        let _ = app.update(Message::Show(ToastType::Success));

        let state = app.store.state();
        assert_eq!(state.len(), 1);
        assert_eq!(state.toasts[0].kind, ToastType::Success);
    }

    #[test]
    fn measured_heights_are_routed_to_the_toaster() {
        let (_dir, flags) = isolated_flags();
        let mut app = app_with(flags);
        let _ = app.update(Message::Show(ToastType::Blank));
        let id = app.store.state().toasts[0].id.clone();

        let _ = app.update(Message::Toaster(ui::toaster::Message::Measured(id, 64.0)));

        assert_eq!(app.store.state().toasts[0].height, Some(64.0));
    }

    #[test]
    fn dismiss_all_releases_hover_pause() {
        let (_dir, flags) = isolated_flags();
        let mut app = app_with(flags);
        let _ = app.update(Message::Show(ToastType::Blank));
        let _ = app.update(Message::Toaster(ui::toaster::Message::PauseStarted));

        let _ = app.update(Message::DismissAll);

        assert!(!app.toaster.is_paused());
    }

    #[test]
    fn dismiss_all_hides_every_toast() {
        let (_dir, flags) = isolated_flags();
        let mut app = app_with(flags);
        let _ = app.update(Message::Show(ToastType::Blank));
        let _ = app.update(Message::Show(ToastType::Loading));

        let _ = app.update(Message::DismissAll);

        assert!(app.store.state().toasts.iter().all(|t| !t.visible));
        assert_eq!(app.store.pending_removals(), 2);
    }

    #[test]
    fn clear_all_empties_the_store() {
        let (_dir, flags) = isolated_flags();
        let mut app = app_with(flags);
        let _ = app.update(Message::Show(ToastType::Error));
        let _ = app.update(Message::ClearAll);
        assert!(app.store.state().is_empty());
    }

    #[test]
    fn ticks_expire_toasts() {
        let (_dir, flags) = isolated_flags();
        let mut app = app_with(flags);
        let _ = app.update(Message::Show(ToastType::Success));

        let later = Instant::now() + Duration::from_secs(5);
        let _ = app.update(Message::Tick(later));

        assert!(app.store.state().is_empty());
    }

    #[test]
    fn flags_override_configured_position() {
        let (dir, mut flags) = isolated_flags();
        fs::write(
            dir.path().join("toaster.toml"),
            "[toaster]\nposition = \"top-left\"\n",
        )
        .expect("failed to write config");
        flags.position = Some(ToastPosition::BottomRight);
        flags.reverse_order = true;

        let app = app_with(flags);

        assert_eq!(app.toaster.options().position, ToastPosition::BottomRight);
        assert!(app.toaster.options().reverse_order);
    }

    #[test]
    fn invalid_config_is_reported_as_error_toast() {
        let (dir, flags) = isolated_flags();
        fs::write(dir.path().join("toaster.toml"), "not = valid = toml")
            .expect("failed to write config");

        let app = app_with(flags);

        let state = app.store.state();
        assert_eq!(state.len(), 1);
        assert_eq!(state.toasts[0].kind, ToastType::Error);
    }

    #[test]
    fn sample_messages_are_numbered() {
        assert_eq!(sample_message(ToastType::Blank, 3), "Notification #3");
        assert!(sample_message(ToastType::Loading, 1).contains("#1"));
    }
}
