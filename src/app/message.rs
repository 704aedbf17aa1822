// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::scene::DEFAULT_SCENE_FILE;
use crate::ui::{track_panel, viewer};
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Viewer(viewer::Message),
    TrackPanel(track_panel::Message),
    /// Periodic tick while a track is loaded, used to collect ended tracks.
    Tick(Instant),
}

/// Runtime flags passed from the launcher into the application.
#[derive(Debug, Clone)]
pub struct Flags {
    /// Scene file to open.
    pub scene_path: PathBuf,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            scene_path: PathBuf::from(DEFAULT_SCENE_FILE),
        }
    }
}
