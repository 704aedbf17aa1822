// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Handles grab-and-drag interaction state for panning the map, and decides
//! whether a press/release pair was a tap (marker activation) or a pan.

use iced::{Point, Vector};

/// How a finished press ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// Pointer stayed within the threshold: treat as a click at the press point.
    Tap(Point),
    /// Pointer moved past the threshold, or the tap was cancelled.
    Panned,
}

/// Manages grab-and-drag state
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Whether a drag operation is currently active
    pub is_dragging: bool,

    /// Whether the pointer moved past the threshold during this drag
    pub has_moved: bool,

    /// Pointer position minus image offset at drag start
    anchor: Option<Vector>,

    /// Pointer position where the drag started
    start_position: Option<Point>,

    /// Set when the gesture can no longer become a tap (e.g. a second finger)
    tap_cancelled: bool,
}

impl DragState {
    /// Starts a drag operation
    pub fn start(&mut self, position: Point, offset: Vector) {
        self.is_dragging = true;
        self.has_moved = false;
        self.tap_cancelled = false;
        self.anchor = Some(Vector::new(position.x - offset.x, position.y - offset.y));
        self.start_position = Some(position);
    }

    /// Calculates the new image offset for the current pointer position.
    ///
    /// Marks the drag as moved once the pointer leaves the `threshold` box
    /// around the start point on either axis.
    pub fn update(&mut self, position: Point, threshold: f32) -> Option<Vector> {
        if !self.is_dragging {
            return None;
        }

        let start = self.start_position?;
        let anchor = self.anchor?;

        if (position.x - start.x).abs() > threshold || (position.y - start.y).abs() > threshold {
            self.has_moved = true;
        }

        Some(Vector::new(position.x - anchor.x, position.y - anchor.y))
    }

    /// Prevents the current gesture from ending in a tap.
    pub fn cancel_tap(&mut self) {
        self.tap_cancelled = true;
    }

    /// Ends the drag operation.
    ///
    /// Returns `None` if no drag was in progress.
    pub fn finish(&mut self) -> Option<DragOutcome> {
        if !self.is_dragging {
            return None;
        }
        let outcome = match self.start_position {
            Some(start) if !self.has_moved && !self.tap_cancelled => DragOutcome::Tap(start),
            _ => DragOutcome::Panned,
        };
        self.is_dragging = false;
        self.anchor = None;
        self.start_position = None;
        Some(outcome)
    }
}
