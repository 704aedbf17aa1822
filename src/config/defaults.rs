// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Scale**: Viewer scale bounds and reset target
//! - **Gestures**: Wheel, button, keyboard and drag increments
//! - **Layout**: Responsive breakpoint and marker sizing
//! - **Volume**: Audio playback volume settings

// ==========================================================================
// Scale Defaults
// ==========================================================================

/// Scale applied when a scene is first shown. Also the minimum scale:
/// the viewer never zooms out past its initial fit.
pub const DEFAULT_SCALE: f32 = 0.7;

/// Maximum allowed scale (150%).
pub const MAX_SCALE: f32 = 1.5;

/// Scale restored by the `0` key.
pub const RESET_SCALE: f32 = 1.0;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Scale delta per mouse wheel notch.
pub const WHEEL_ZOOM_STEP: f32 = 0.05;

/// Scale delta for zoom buttons and `+`/`-` keys.
pub const BUTTON_ZOOM_STEP: f32 = 0.1;

/// Offset delta for arrow keys (in logical pixels).
pub const KEYBOARD_PAN_STEP: f32 = 50.0;

/// Movement (per axis) beyond which a press becomes a drag and no longer
/// counts as a tap on a marker.
pub const DRAG_THRESHOLD: f32 = 5.0;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Viewports at most this wide use height-driven layout.
pub const NARROW_BREAKPOINT: f32 = 768.0;

/// Marker icons are drawn at this multiple of their size relative to the
/// background image.
pub const MARKER_SIZE_FACTOR: f32 = 1.5;

/// Natural size used for markers that have no icon image.
pub const FALLBACK_MARKER_SIZE: f32 = 64.0;

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 0.8;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_SCALE > 0.0);
    assert!(MAX_SCALE >= DEFAULT_SCALE);
    assert!(RESET_SCALE >= DEFAULT_SCALE);
    assert!(RESET_SCALE <= MAX_SCALE);

    assert!(WHEEL_ZOOM_STEP > 0.0);
    assert!(BUTTON_ZOOM_STEP > 0.0);
    assert!(KEYBOARD_PAN_STEP > 0.0);
    assert!(DRAG_THRESHOLD >= 0.0);

    assert!(NARROW_BREAKPOINT > 0.0);
    assert!(MARKER_SIZE_FACTOR > 0.0);
    assert!(FALLBACK_MARKER_SIZE > 0.0);

    assert!(MIN_VOLUME <= DEFAULT_VOLUME);
    assert!(MAX_VOLUME >= DEFAULT_VOLUME);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_defaults_are_valid() {
        assert_eq!(DEFAULT_SCALE, 0.7);
        assert_eq!(MAX_SCALE, 1.5);
        assert!(RESET_SCALE >= DEFAULT_SCALE && RESET_SCALE <= MAX_SCALE);
    }

    #[test]
    fn gesture_defaults_match_viewer_behavior() {
        assert_eq!(WHEEL_ZOOM_STEP, 0.05);
        assert_eq!(BUTTON_ZOOM_STEP, 0.1);
        assert_eq!(KEYBOARD_PAN_STEP, 50.0);
        assert_eq!(DRAG_THRESHOLD, 5.0);
    }

    #[test]
    fn volume_defaults_are_valid() {
        assert_eq!(DEFAULT_VOLUME, 0.8);
        assert!(DEFAULT_VOLUME >= MIN_VOLUME);
        assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    }
}
