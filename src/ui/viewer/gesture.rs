// SPDX-License-Identifier: MPL-2.0
//! Gesture router translating raw input into viewport operations.
//!
//! Pointer, single-finger touch, wheel, button and keyboard input all end up
//! here. The router owns the drag state machine (`idle` ⇄ `dragging`) and
//! mutates the [`ViewportState`] it is handed. A press that is released
//! without moving past the drag threshold yields [`Effect::Tap`], which the
//! orchestrator hit-tests against markers.

use crate::config::ViewerSettings;
use crate::ui::state::{DragOutcome, DragState, ViewportState};
use iced::keyboard::{self, key::Named};
use iced::touch::Finger;
use iced::{Point, Size};

/// Arrow key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Keyboard shortcuts understood by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    ZoomIn,
    ZoomOut,
    Reset,
    Pan(Direction),
}

impl KeyCommand {
    /// Maps a logical key to a viewer command.
    #[must_use]
    pub fn from_key(key: &keyboard::Key) -> Option<Self> {
        match key {
            keyboard::Key::Character(c) => match c.as_str() {
                "+" | "=" => Some(Self::ZoomIn),
                "-" => Some(Self::ZoomOut),
                "0" => Some(Self::Reset),
                _ => None,
            },
            keyboard::Key::Named(Named::ArrowUp) => Some(Self::Pan(Direction::Up)),
            keyboard::Key::Named(Named::ArrowDown) => Some(Self::Pan(Direction::Down)),
            keyboard::Key::Named(Named::ArrowLeft) => Some(Self::Pan(Direction::Left)),
            keyboard::Key::Named(Named::ArrowRight) => Some(Self::Pan(Direction::Right)),
            _ => None,
        }
    }
}

/// Input messages, positions in viewport coordinates.
#[derive(Debug, Clone)]
pub enum Message {
    /// Render surface reported a new size.
    Resized(Size),
    /// Left mouse button pressed.
    PointerPressed(Point),
    /// Mouse moved.
    PointerMoved(Point),
    /// Left mouse button released.
    PointerReleased,
    FingerPressed { id: Finger, position: Point },
    FingerMoved { id: Finger, position: Point },
    FingerLifted { id: Finger },
    /// Touch was interrupted by the system; never produces a tap.
    FingerLost { id: Finger },
    /// Wheel scroll; positive `delta_y` scrolls away from the user.
    WheelScrolled { position: Point, delta_y: f32 },
    /// Zoom-in button.
    ZoomIn,
    /// Zoom-out button.
    ZoomOut,
    /// Return to the initial scale.
    FitToScreen,
    Key(KeyCommand),
}

/// Effects produced by gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Nothing to do.
    None,
    /// Scale or offset changed; the surface must be redrawn.
    TransformChanged,
    /// Press released without dragging, at this viewport position.
    Tap(Point),
}

/// Gesture router state.
#[derive(Debug, Clone)]
pub struct State {
    drag: DragState,
    /// Fingers currently down, in press order.
    fingers: Vec<Finger>,
    /// Finger driving the current drag.
    tracked_finger: Option<Finger>,
    wheel_step: f32,
    button_step: f32,
    pan_step: f32,
    drag_threshold: f32,
}

impl State {
    #[must_use]
    pub fn new(settings: &ViewerSettings) -> Self {
        Self {
            drag: DragState::default(),
            fingers: Vec::new(),
            tracked_finger: None,
            wheel_step: settings.wheel_step,
            button_step: settings.button_step,
            pan_step: settings.pan_step,
            drag_threshold: settings.drag_threshold,
        }
    }

    /// Routes one input message into the viewport.
    pub fn handle(&mut self, viewport: &mut ViewportState, msg: Message) -> Effect {
        match msg {
            Message::Resized(size) => changed(viewport.resize(size)),
            Message::PointerPressed(position) => {
                self.drag.start(position, viewport.offset());
                Effect::None
            }
            Message::PointerMoved(position) => self.drag_to(viewport, position),
            Message::PointerReleased => self.finish_drag(),
            Message::FingerPressed { id, position } => {
                self.fingers.push(id);
                if self.fingers.len() == 1 {
                    self.tracked_finger = Some(id);
                    self.drag.start(position, viewport.offset());
                } else {
                    self.drag.cancel_tap();
                }
                Effect::None
            }
            Message::FingerMoved { id, position } => {
                if self.fingers.len() != 1 || self.tracked_finger != Some(id) {
                    return Effect::None;
                }
                self.drag_to(viewport, position)
            }
            Message::FingerLifted { id } => {
                if !self.release_finger(id) {
                    return Effect::None;
                }
                self.finish_drag()
            }
            Message::FingerLost { id } => {
                if self.release_finger(id) {
                    self.drag.cancel_tap();
                    self.finish_drag();
                }
                Effect::None
            }
            Message::WheelScrolled { position, delta_y } => {
                let delta = if delta_y > 0.0 {
                    self.wheel_step
                } else if delta_y < 0.0 {
                    -self.wheel_step
                } else {
                    return Effect::None;
                };
                changed(viewport.zoom_at(delta, position))
            }
            Message::ZoomIn | Message::Key(KeyCommand::ZoomIn) => {
                changed(viewport.zoom_at_center(self.button_step))
            }
            Message::ZoomOut | Message::Key(KeyCommand::ZoomOut) => {
                changed(viewport.zoom_at_center(-self.button_step))
            }
            Message::FitToScreen => {
                viewport.fit_to_screen();
                Effect::TransformChanged
            }
            Message::Key(KeyCommand::Reset) => {
                viewport.reset();
                Effect::TransformChanged
            }
            Message::Key(KeyCommand::Pan(direction)) => {
                let step = self.pan_step;
                let (dx, dy) = match direction {
                    Direction::Up => (0.0, step),
                    Direction::Down => (0.0, -step),
                    Direction::Left => (step, 0.0),
                    Direction::Right => (-step, 0.0),
                };
                changed(viewport.pan(dx, dy))
            }
        }
    }

    /// Whether a drag is currently in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging
    }

    /// Whether the current (or last) drag moved past the threshold.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.drag.has_moved
    }

    fn drag_to(&mut self, viewport: &mut ViewportState, position: Point) -> Effect {
        match self.drag.update(position, self.drag_threshold) {
            Some(offset) => changed(viewport.set_offset(offset)),
            None => Effect::None,
        }
    }

    fn finish_drag(&mut self) -> Effect {
        match self.drag.finish() {
            Some(DragOutcome::Tap(position)) => Effect::Tap(position),
            Some(DragOutcome::Panned) | None => Effect::None,
        }
    }

    /// Forgets a finger. Returns true if it was down.
    fn release_finger(&mut self, id: Finger) -> bool {
        let Some(index) = self.fingers.iter().position(|f| *f == id) else {
            return false;
        };
        self.fingers.remove(index);
        if self.tracked_finger == Some(id) || self.fingers.is_empty() {
            self.tracked_finger = None;
        }
        true
    }
}

fn changed(did_change: bool) -> Effect {
    if did_change {
        Effect::TransformChanged
    } else {
        Effect::None
    }
}
