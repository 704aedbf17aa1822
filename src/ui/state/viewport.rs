// SPDX-License-Identifier: MPL-2.0
//! Viewport state management
//!
//! Holds the scale and pan offset of the map image and keeps them inside
//! their bounds. All mutations go through methods that re-clamp, so the image
//! always either covers the viewport or sits centered in it on each axis.
//!
//! Coordinates:
//! - *viewport* space is logical pixels relative to the top-left of the viewer.
//! - *base* space is the unscaled image layout (see [`LayoutAxis::base_size`]).
//!
//! `viewport = offset + base * scale`

use super::layout::LayoutAxis;
use crate::config::{LayoutMode, ViewerSettings, RESET_SCALE};
use iced::{Point, Rectangle, Size, Vector};

/// Inclusive scale range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBounds {
    pub min: f32,
    pub max: f32,
}

impl ScaleBounds {
    /// Clamps a scale into the range.
    #[must_use]
    pub fn clamp(self, scale: f32) -> f32 {
        scale.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn contains(self, scale: f32) -> bool {
        scale >= self.min && scale <= self.max
    }
}

/// Affine transform applied to the render surface:
/// `translate(translation) scale(scale)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector,
    pub scale: f32,
}

impl Transform {
    /// Maps a base-layout rectangle to viewport coordinates.
    #[must_use]
    pub fn apply(self, rect: Rectangle) -> Rectangle {
        Rectangle {
            x: self.translation.x + rect.x * self.scale,
            y: self.translation.y + rect.y * self.scale,
            width: rect.width * self.scale,
            height: rect.height * self.scale,
        }
    }
}

/// Manages scale and offset of the displayed image.
#[derive(Debug, Clone)]
pub struct ViewportState {
    scale: f32,
    offset: Vector,
    viewport: Size,
    image: Size,
    axis: LayoutAxis,
    layout: LayoutMode,
    narrow_breakpoint: f32,
    bounds: ScaleBounds,
}

impl ViewportState {
    /// Creates a viewport for an image of the given natural size.
    ///
    /// The scale starts at the configured default, which is also the minimum.
    /// The viewport size is unknown until the first [`resize`](Self::resize).
    #[must_use]
    pub fn new(settings: &ViewerSettings, image: Size) -> Self {
        let bounds = ScaleBounds {
            min: settings.default_scale,
            max: settings.max_scale.max(settings.default_scale),
        };
        Self {
            scale: bounds.min,
            offset: Vector::new(0.0, 0.0),
            viewport: Size::ZERO,
            image,
            axis: LayoutAxis::select(settings.layout, 0.0, settings.narrow_breakpoint),
            layout: settings.layout,
            narrow_breakpoint: settings.narrow_breakpoint,
            bounds,
        }
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[must_use]
    pub fn offset(&self) -> Vector {
        self.offset
    }

    #[must_use]
    pub fn bounds(&self) -> ScaleBounds {
        self.bounds
    }

    #[must_use]
    pub fn axis(&self) -> LayoutAxis {
        self.axis
    }

    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Natural size of the background image.
    #[must_use]
    pub fn image_size(&self) -> Size {
        self.image
    }

    /// Updates the viewport size, re-selects the layout axis and re-clamps.
    ///
    /// Returns true if the size changed.
    pub fn resize(&mut self, size: Size) -> bool {
        if size == self.viewport {
            return false;
        }
        self.viewport = size;
        self.axis = LayoutAxis::select(self.layout, size.width, self.narrow_breakpoint);
        self.clamp_offset();
        true
    }

    /// Unscaled image size in the current layout.
    #[must_use]
    pub fn base_size(&self) -> Size {
        self.axis.base_size(self.viewport, self.image)
    }

    /// Image size on screen at the current scale.
    #[must_use]
    pub fn display_size(&self) -> Size {
        let base = self.base_size();
        Size::new(base.width * self.scale, base.height * self.scale)
    }

    /// Center of the viewport in viewport coordinates.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    /// Sets the scale, keeping the image point under `anchor` fixed.
    ///
    /// Returns false when the clamped scale equals the current one.
    pub fn set_scale(&mut self, new_scale: f32, anchor: Point) -> bool {
        let new_scale = self.bounds.clamp(new_scale);
        if new_scale == self.scale {
            return false;
        }

        let ratio = new_scale / self.scale;
        self.offset = Vector::new(
            anchor.x - (anchor.x - self.offset.x) * ratio,
            anchor.y - (anchor.y - self.offset.y) * ratio,
        );
        self.scale = new_scale;
        self.clamp_offset();
        true
    }

    /// Changes the scale by `delta` around `anchor`.
    pub fn zoom_at(&mut self, delta: f32, anchor: Point) -> bool {
        self.set_scale(self.scale + delta, anchor)
    }

    /// Changes the scale by `delta` around the viewport center.
    pub fn zoom_at_center(&mut self, delta: f32) -> bool {
        self.zoom_at(delta, self.center())
    }

    /// Moves the image by the given amount. Returns true if the offset changed.
    pub fn pan(&mut self, dx: f32, dy: f32) -> bool {
        self.set_offset(self.offset + Vector::new(dx, dy))
    }

    /// Moves the image to an absolute offset. Returns true if the offset changed.
    pub fn set_offset(&mut self, offset: Vector) -> bool {
        let previous = self.offset;
        self.offset = offset;
        self.clamp_offset();
        self.offset != previous
    }

    /// Returns to 100% scale with the image anchored top-left (or centered).
    pub fn reset(&mut self) {
        self.scale = self.bounds.clamp(RESET_SCALE);
        self.offset = Vector::new(0.0, 0.0);
        self.clamp_offset();
    }

    /// Returns to the initial (minimum) scale.
    pub fn fit_to_screen(&mut self) {
        self.scale = self.bounds.min;
        self.offset = Vector::new(0.0, 0.0);
        self.clamp_offset();
    }

    fn clamp_offset(&mut self) {
        let display = self.display_size();
        self.offset.x = clamp_axis(self.offset.x, self.viewport.width, display.width);
        self.offset.y = clamp_axis(self.offset.y, self.viewport.height, display.height);
    }

    /// Transform to apply to the render surface.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.offset,
            scale: self.scale,
        }
    }

    /// Converts a viewport point to base-layout coordinates.
    #[must_use]
    pub fn to_image(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.offset.x) / self.scale,
            (point.y - self.offset.y) / self.scale,
        )
    }

    /// Converts a base-layout point to viewport coordinates.
    #[must_use]
    pub fn to_screen(&self, point: Point) -> Point {
        Point::new(
            self.offset.x + point.x * self.scale,
            self.offset.y + point.y * self.scale,
        )
    }
}

/// Centers content smaller than the viewport, otherwise keeps both edges
/// outside the viewport.
fn clamp_axis(offset: f32, viewport: f32, display: f32) -> f32 {
    if display <= viewport {
        (viewport - display) / 2.0
    } else {
        offset.clamp(viewport - display, 0.0)
    }
}
