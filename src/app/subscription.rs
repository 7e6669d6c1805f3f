// SPDX-License-Identifier: MPL-2.0
//! Timer subscription for the application.

use super::Message;
use iced::{time, Subscription};
use std::time::Duration;

/// Interval at which the toast scheduler is advanced.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Ticks only while toasts are tracked so an idle window stays idle.
pub fn create_tick_subscription(has_toasts: bool) -> Subscription<Message> {
    if has_toasts {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
