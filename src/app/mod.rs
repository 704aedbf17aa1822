// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the map viewer and the
//! audio dispatcher.
//!
//! The `App` struct owns the loaded scene, the viewer and the dispatcher, and
//! translates messages into viewport changes or marker activations.

mod message;
pub mod paths;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;
pub use update::activate_at;

use crate::audio::{DeviceBackend, MarkerDispatcher, MediaBackend};
use crate::config::{self, Config};
use crate::scene::Scene;
use crate::ui::track_panel;
use crate::ui::viewer::{Effect, Viewer};
use iced::{window, Element, Subscription, Task, Theme};
use std::path::Path;

pub const APP_NAME: &str = "Soundmap";
pub const WINDOW_DEFAULT_WIDTH: f32 = 1024.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 768.0;
pub const MIN_WINDOW_WIDTH: f32 = 320.0;
pub const MIN_WINDOW_HEIGHT: f32 = 480.0;

/// Root Iced application state.
pub struct App<B: MediaBackend = DeviceBackend> {
    screen: Screen,
    dispatcher: MarkerDispatcher<B>,
}

/// Builds the window settings.
#[must_use]
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Runs the application.
///
/// # Errors
///
/// Returns an error if the window or renderer cannot be created.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    type Root = App<DeviceBackend>;

    // iced 0.14 requires a `Fn` boot; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        Root::new(flags)
    };

    iced::application(boot, Root::update, Root::view)
        .title(Root::title)
        .theme(Root::theme)
        .window(window_settings())
        .subscription(Root::subscription)
        .run()
}

impl App {
    /// Loads the config and scene and opens the audio device.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        if let Some(warning) = config_warning {
            tracing::warn!("{warning}");
        }
        let backend = DeviceBackend::new(config.audio.volume());
        (Self::with_backend(&flags.scene_path, &config, backend), Task::none())
    }
}

impl<B: MediaBackend> App<B> {
    /// Builds the application around an explicit media backend.
    pub fn with_backend(scene_path: &Path, config: &Config, backend: B) -> Self {
        let screen = match Scene::load(scene_path) {
            Ok(scene) => {
                let viewer = Viewer::new(&config.viewer.settings(), &scene);
                Screen::Map { scene, viewer }
            }
            Err(err) => {
                tracing::error!("failed to load scene {}: {err}", scene_path.display());
                Screen::Failed(err.to_string())
            }
        };

        Self {
            screen,
            dispatcher: MarkerDispatcher::new(backend),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Viewer(msg) => {
                if let Screen::Map { scene, viewer } = &mut self.screen {
                    if let Effect::Tap(position) = viewer.update(msg) {
                        if activate_at(scene, viewer.viewport(), &mut self.dispatcher, position)
                            .is_none()
                        {
                            tracing::trace!(x = position.x, y = position.y, "tap on empty map");
                        }
                    }
                }
            }
            Message::TrackPanel(track_panel::Message::TrackPressed(index)) => {
                self.dispatcher.play_track(index);
            }
            Message::Tick(_) => {
                self.dispatcher.poll_finished();
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            screen: &self.screen,
            panel: self.dispatcher.player().panel(),
            highlighted: self.dispatcher.highlighted_marker(),
        })
    }

    #[must_use]
    pub fn title(&self) -> String {
        self.screen
            .scene()
            .and_then(|scene| scene.image_path.file_stem())
            .map_or_else(
                || APP_NAME.to_string(),
                |name| format!("{} - {APP_NAME}", name.to_string_lossy()),
            )
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_keyboard_subscription(),
            subscription::create_tick_subscription(
                self.dispatcher.player().active_index().is_some(),
            ),
        ])
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub fn dispatcher(&self) -> &MarkerDispatcher<B> {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut MarkerDispatcher<B> {
        &mut self.dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MediaHandle;
    use crate::scene::MarkerId;
    use crate::test_utils::FakeBackend;
    use crate::ui::viewer;
    use iced::{Point, Size};
    use std::fs;
    use std::time::Instant;
    use tempfile::{tempdir, TempDir};

    /// 1000x1000 map with one 100px marker at its center.
    fn scene_dir() -> (TempDir, std::path::PathBuf) {
        let dir = tempdir().expect("failed to create temp dir");
        image_rs::RgbaImage::new(1000, 1000)
            .save(dir.path().join("map.png"))
            .expect("failed to write map");
        image_rs::RgbaImage::new(100, 100)
            .save(dir.path().join("pin.png"))
            .expect("failed to write icon");
        let path = dir.path().join("scene.toml");
        fs::write(
            &path,
            r#"
image = "map.png"

[[markers]]
x = 0.5
y = 0.5
icon = "pin.png"
title = "Library"
audio = "library.mp3"
"#,
        )
        .expect("failed to write scene");
        (dir, path)
    }

    fn app() -> (TempDir, App<FakeBackend>) {
        let (dir, path) = scene_dir();
        let mut app = App::with_backend(&path, &Config::default(), FakeBackend::default());
        let _ = app.update(Message::Viewer(viewer::Message::Resized(Size::new(
            1000.0, 1000.0,
        ))));
        (dir, app)
    }

    fn click(app: &mut App<FakeBackend>, press: Point, release: Point) {
        let _ = app.update(Message::Viewer(viewer::Message::PointerPressed(press)));
        let _ = app.update(Message::Viewer(viewer::Message::PointerMoved(release)));
        let _ = app.update(Message::Viewer(viewer::Message::PointerReleased));
    }

    #[test]
    fn missing_scene_shows_failure() {
        let dir = tempdir().expect("failed to create temp dir");
        let app = App::with_backend(
            &dir.path().join("absent.toml"),
            &Config::default(),
            FakeBackend::default(),
        );
        assert!(matches!(app.screen(), Screen::Failed(_)));
        assert_eq!(app.title(), APP_NAME);
    }

    #[test]
    fn title_includes_map_name() {
        let (_dir, app) = app();
        assert_eq!(app.title(), format!("map - {APP_NAME}"));
    }

    #[test]
    fn tap_on_marker_starts_playback() {
        let (_dir, mut app) = app();
        click(&mut app, Point::new(500.0, 500.0), Point::new(501.0, 500.0));

        assert_eq!(app.dispatcher().active_marker(), Some(MarkerId(0)));
        assert!(app.dispatcher().player().is_playing());
        assert_eq!(app.dispatcher().highlighted_marker(), Some(MarkerId(0)));
    }

    #[test]
    fn tap_on_empty_map_does_nothing() {
        let (_dir, mut app) = app();
        click(&mut app, Point::new(200.0, 200.0), Point::new(200.0, 200.0));
        assert_eq!(app.dispatcher().active_marker(), None);
    }

    #[test]
    fn track_row_press_toggles_playback() {
        let (_dir, mut app) = app();
        click(&mut app, Point::new(500.0, 500.0), Point::new(500.0, 500.0));

        let _ = app.update(Message::TrackPanel(track_panel::Message::TrackPressed(0)));
        assert!(!app.dispatcher().player().is_playing());
        assert_eq!(app.dispatcher().highlighted_marker(), None);
    }

    #[test]
    fn tick_collects_ended_track() {
        let (_dir, mut app) = app();
        click(&mut app, Point::new(500.0, 500.0), Point::new(500.0, 500.0));
        let id = app
            .dispatcher()
            .player()
            .active_handle()
            .map(MediaHandle::id)
            .expect("track should be active");

        app.dispatcher_mut().player_mut().backend_mut().finish(id);
        let _ = app.update(Message::Tick(Instant::now()));

        assert_eq!(app.dispatcher().player().active_index(), None);
        assert_eq!(app.dispatcher().highlighted_marker(), None);
    }
}
