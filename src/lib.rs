// SPDX-License-Identifier: MPL-2.0
//! `soundmap` is an interactive sound map built with the Iced GUI framework.
//!
//! A scene pairs a map image with hotspot markers. The map can be panned and
//! zoomed with the mouse, touch, wheel or keyboard; clicking a marker plays
//! one of its audio tracks.

pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod scene;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
