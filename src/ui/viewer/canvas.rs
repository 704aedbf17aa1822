// SPDX-License-Identifier: MPL-2.0
//! Map canvas: draws the transformed map with its markers and turns raw
//! mouse and touch events into gesture messages.

use super::gesture::Message;
use crate::scene::{hit_test, MarkerId, PlacedMarker};
use crate::ui::design_tokens::{opacity, palette, sizing, spacing, typography};
use crate::ui::state::ViewportState;
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke, Text};
use iced::widget::{image, Action};
use iced::{mouse, touch, Color, Point, Rectangle, Size, Theme, Vector};

/// Canvas program borrowing everything it draws.
pub struct MapCanvas<'a> {
    pub viewport: &'a ViewportState,
    pub markers: &'a [PlacedMarker],
    pub background: &'a image::Handle,
    /// Icon handle per marker, indexed by marker id.
    pub icons: &'a [Option<image::Handle>],
    pub highlighted: Option<MarkerId>,
    pub dragging: bool,
}

/// Widget-local state: the last size reported to the viewport.
#[derive(Debug, Default)]
pub struct CanvasState {
    last_size: Option<Size>,
}

fn publish(message: Message) -> Option<Action<Message>> {
    Some(Action::publish(message).and_capture())
}

impl canvas::Program<Message> for MapCanvas<'_> {
    type State = CanvasState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        if state.last_size != Some(bounds.size()) {
            state.last_size = Some(bounds.size());
            return Some(Action::publish(Message::Resized(bounds.size())));
        }

        let origin = Vector::new(bounds.x, bounds.y);
        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                publish(Message::PointerPressed(position))
            }
            // Drags keep following the pointer outside the canvas.
            iced::Event::Mouse(mouse::Event::CursorMoved { position }) if self.dragging => {
                publish(Message::PointerMoved(*position - origin))
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
                if self.dragging =>
            {
                publish(Message::PointerReleased)
            }
            iced::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let position = cursor.position_in(bounds)?;
                let delta_y = match delta {
                    mouse::ScrollDelta::Lines { y, .. } | mouse::ScrollDelta::Pixels { y, .. } => {
                        *y
                    }
                };
                publish(Message::WheelScrolled { position, delta_y })
            }
            iced::Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if !bounds.contains(*position) {
                    return None;
                }
                publish(Message::FingerPressed {
                    id: *id,
                    position: *position - origin,
                })
            }
            iced::Event::Touch(touch::Event::FingerMoved { id, position }) => {
                publish(Message::FingerMoved {
                    id: *id,
                    position: *position - origin,
                })
            }
            iced::Event::Touch(touch::Event::FingerLifted { id, .. }) => {
                publish(Message::FingerLifted { id: *id })
            }
            iced::Event::Touch(touch::Event::FingerLost { id, .. }) => {
                publish(Message::FingerLost { id: *id })
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let transform = self.viewport.transform();

        let map = Rectangle::new(
            Point::ORIGIN + transform.translation,
            self.viewport.display_size(),
        );
        frame.draw_image(map, self.background);

        for marker in self.markers {
            let rect = transform.apply(marker.base_bounds(self.viewport));
            let center = rect.center();

            match self.icons.get(marker.id.0).and_then(Option::as_ref) {
                Some(icon) => frame.draw_image(rect, icon),
                None => {
                    let disc = Path::circle(center, rect.width.min(rect.height) / 2.0);
                    frame.fill(&disc, Color {
                        a: opacity::OVERLAY_HOVER,
                        ..palette::PRIMARY_500
                    });
                    frame.stroke(
                        &disc,
                        Stroke::default().with_width(2.0).with_color(palette::WHITE),
                    );
                }
            }

            if self.highlighted == Some(marker.id) {
                let ring = Path::circle(
                    center,
                    rect.width.max(rect.height) / 2.0 + spacing::XXS,
                );
                frame.stroke(
                    &ring,
                    Stroke::default()
                        .with_width(sizing::PLAYING_RING)
                        .with_color(palette::PLAYING),
                );
            }

            if let Some(title) = &marker.title {
                frame.fill_text(Text {
                    content: title.clone(),
                    position: Point::new(center.x, rect.y + rect.height + spacing::XXS),
                    color: palette::WHITE,
                    size: typography::CAPTION.into(),
                    align_x: iced::widget::text::Alignment::Center,
                    ..Text::default()
                });
            }
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.dragging {
            return mouse::Interaction::Grabbing;
        }
        let Some(position) = cursor.position_in(bounds) else {
            return mouse::Interaction::default();
        };
        if hit_test(self.markers, self.viewport, position).is_some() {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::Grab
        }
    }
}
