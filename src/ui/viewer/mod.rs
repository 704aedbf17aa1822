// SPDX-License-Identifier: MPL-2.0
//! Map viewer: the pannable, zoomable map with its markers and zoom controls.

pub mod canvas;
pub mod controls;
pub mod gesture;

pub use gesture::{Effect, Message};

use crate::config::ViewerSettings;
use crate::scene::{MarkerId, Scene};
use crate::ui::state::ViewportState;
use iced::widget::{image, Canvas, Stack};
use iced::{Element, Length};

/// Viewer state: viewport, gesture router and decoded image handles.
#[derive(Debug, Clone)]
pub struct Viewer {
    viewport: ViewportState,
    gestures: gesture::State,
    background: image::Handle,
    icons: Vec<Option<image::Handle>>,
}

impl Viewer {
    #[must_use]
    pub fn new(settings: &ViewerSettings, scene: &Scene) -> Self {
        Self {
            viewport: ViewportState::new(settings, scene.image_size),
            gestures: gesture::State::new(settings),
            background: image::Handle::from_path(&scene.image_path),
            icons: scene
                .markers
                .iter()
                .map(|marker| marker.icon.as_ref().map(image::Handle::from_path))
                .collect(),
        }
    }

    /// Routes an input message and reports what the caller must do next.
    pub fn update(&mut self, message: Message) -> Effect {
        let effect = self.gestures.handle(&mut self.viewport, message);
        if effect == Effect::TransformChanged {
            tracing::trace!(
                scale = self.viewport.scale(),
                x = self.viewport.offset().x,
                y = self.viewport.offset().y,
                "viewport transform changed"
            );
        }
        effect
    }

    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    pub fn view<'a>(&'a self, scene: &'a Scene, highlighted: Option<MarkerId>) -> Element<'a, Message> {
        let map = Canvas::new(canvas::MapCanvas {
            viewport: &self.viewport,
            markers: &scene.markers,
            background: &self.background,
            icons: &self.icons,
            highlighted,
            dragging: self.is_dragging(),
        })
        .width(Length::Fill)
        .height(Length::Fill);

        Stack::new().push(map).push(controls::view()).into()
    }
}
