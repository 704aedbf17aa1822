// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern.
//!
//! - [`viewer`] - Pannable, zoomable map with markers and zoom controls
//! - [`track_panel`] - Track rows shown after a marker is activated
//! - [`state`] - Window-independent viewport, layout and drag state
//! - [`styles`] - Button and container styles
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod design_tokens;
pub mod state;
pub mod styles;
pub mod track_panel;
pub mod viewer;
