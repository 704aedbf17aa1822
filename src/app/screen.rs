// SPDX-License-Identifier: MPL-2.0
//! What the window currently shows.

use crate::scene::Scene;
use crate::ui::viewer::Viewer;

#[derive(Debug)]
pub enum Screen {
    /// The scene loaded and its map is shown.
    Map { scene: Scene, viewer: Viewer },
    /// The scene could not be loaded; the message is shown instead.
    Failed(String),
}

impl Screen {
    #[must_use]
    pub fn scene(&self) -> Option<&Scene> {
        match self {
            Self::Map { scene, .. } => Some(scene),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn viewer(&self) -> Option<&Viewer> {
        match self {
            Self::Map { viewer, .. } => Some(viewer),
            Self::Failed(_) => None,
        }
    }
}
