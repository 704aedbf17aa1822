// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use crate::ui::viewer::{self, gesture::KeyCommand};
use iced::{event, keyboard, time, Subscription};
use std::time::Duration;

/// Interval at which finished tracks are collected.
const PLAYBACK_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Routes viewer shortcuts. Keys captured by a focused widget are skipped.
pub fn create_keyboard_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window_id| {
        if status == event::Status::Captured {
            return None;
        }
        match event {
            event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
                KeyCommand::from_key(&key).map(|command| Message::Viewer(viewer::Message::Key(command)))
            }
            _ => None,
        }
    })
}

/// Ticks while a track is loaded so end-of-track notifications get drained.
pub fn create_tick_subscription(track_loaded: bool) -> Subscription<Message> {
    if track_loaded {
        time::every(PLAYBACK_POLL_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
