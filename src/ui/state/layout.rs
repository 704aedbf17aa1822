// SPDX-License-Identifier: MPL-2.0
//! Responsive layout rules.
//!
//! The background image is laid out at a base size driven by one viewport axis:
//! the full viewport width on wide screens, the full viewport height on narrow
//! ones. Scaling then happens on top of that base size, and marker icons are
//! sized relative to the same base.

use crate::config::{LayoutMode, MARKER_SIZE_FACTOR};
use iced::Size;

/// Viewport axis that determines the unscaled image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutAxis {
    /// Image width equals viewport width.
    #[default]
    Width,
    /// Image height equals viewport height.
    Height,
}

/// Returns whether a viewport of this width counts as narrow (mobile).
#[must_use]
pub fn is_narrow(viewport_width: f32, breakpoint: f32) -> bool {
    viewport_width <= breakpoint
}

impl LayoutAxis {
    /// Picks the driving axis for a viewport.
    #[must_use]
    pub fn select(mode: LayoutMode, viewport_width: f32, breakpoint: f32) -> Self {
        match mode {
            LayoutMode::Width => Self::Width,
            LayoutMode::Height => Self::Height,
            LayoutMode::Auto if is_narrow(viewport_width, breakpoint) => Self::Height,
            LayoutMode::Auto => Self::Width,
        }
    }

    /// Unscaled image size for the given viewport.
    ///
    /// `image` is the natural image size; only its aspect ratio matters.
    #[must_use]
    pub fn base_size(self, viewport: Size, image: Size) -> Size {
        if image.width <= 0.0 || image.height <= 0.0 {
            return Size::ZERO;
        }
        let aspect = image.height / image.width;
        match self {
            Self::Width => Size::new(viewport.width, viewport.width * aspect),
            Self::Height => Size::new(viewport.height / aspect, viewport.height),
        }
    }
}

/// Size of a marker icon in base-layout units.
///
/// The icon keeps the proportion it has against the natural background image,
/// measured along the driving axis, enlarged by [`MARKER_SIZE_FACTOR`].
#[must_use]
pub fn marker_size(icon: Size, background: Size, base: Size, axis: LayoutAxis) -> Size {
    if icon.width <= 0.0 || icon.height <= 0.0 {
        return Size::ZERO;
    }
    match axis {
        LayoutAxis::Width => {
            if background.width <= 0.0 {
                return Size::ZERO;
            }
            let width = icon.width / background.width * base.width * MARKER_SIZE_FACTOR;
            Size::new(width, width * icon.height / icon.width)
        }
        LayoutAxis::Height => {
            if background.height <= 0.0 {
                return Size::ZERO;
            }
            let height = icon.height / background.height * base.height * MARKER_SIZE_FACTOR;
            Size::new(height * icon.width / icon.height, height)
        }
    }
}
