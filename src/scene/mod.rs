// SPDX-License-Identifier: MPL-2.0
//! Scene files: the map image and its hotspot markers.
//!
//! A scene is a TOML file next to its assets:
//!
//! ```toml
//! image = "campus.png"
//!
//! [[markers]]
//! x = 0.42
//! y = 0.31
//! icon = "icons/library.png"
//! title = "Library"
//! audio = "audio/library.mp3"
//!
//! [[markers]]
//! x = 0.65
//! y = 0.58
//! title = "650 Street"
//! audio = "audio/street-day.mp3"
//! audio2 = "audio/street-night.mp3"
//! name2 = "Night"
//! ```
//!
//! Paths are relative to the scene file.

pub mod marker;

pub use marker::{
    hit_test, MarkerDescriptor, MarkerId, MarkerSource, PlacedMarker, Track, TrackList,
};

use crate::error::{Error, Result};
use iced::{Point, Size};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default scene file looked up in the working directory.
pub const DEFAULT_SCENE_FILE: &str = "scene.toml";

/// Scene file contents as written on disk.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SceneFile {
    /// Background map image.
    pub image: PathBuf,
    #[serde(default)]
    pub markers: Vec<MarkerSource>,
}

impl SceneFile {
    /// Parses scene TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Scene`] if the content is not a valid scene.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Scene(e.to_string()))
    }
}

/// A loaded scene with resolved paths and image sizes.
#[derive(Debug, Clone)]
pub struct Scene {
    pub image_path: PathBuf,
    /// Natural size of the background image.
    pub image_size: Size,
    pub markers: Vec<PlacedMarker>,
}

fn image_size(path: &Path) -> Result<Size> {
    let (width, height) = image_rs::image_dimensions(path)
        .map_err(|e| Error::Scene(format!("{}: {e}", path.display())))?;
    #[allow(clippy::cast_precision_loss)]
    Ok(Size::new(width as f32, height as f32))
}

impl Scene {
    /// Loads a scene file and measures its images.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// background image cannot be measured. Unreadable marker icons only
    /// produce a warning and fall back to the default marker disc.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Io(format!("{}: {e}", path.display())))?;
        let file = SceneFile::parse(&content)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_file(file, base_dir)
    }

    /// Builds a scene from parsed contents, resolving paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the background image cannot be measured.
    pub fn from_file(file: SceneFile, base_dir: &Path) -> Result<Self> {
        let image_path = base_dir.join(&file.image);
        let image_size = image_size(&image_path)?;

        let markers: Vec<_> = file
            .markers
            .iter()
            .enumerate()
            .map(|(index, source)| place_marker(MarkerId(index), source, base_dir))
            .collect();

        let interactive = markers.iter().filter(|m| m.is_interactive()).count();
        tracing::info!(
            image = %image_path.display(),
            markers = markers.len(),
            interactive,
            "scene loaded"
        );

        Ok(Self {
            image_path,
            image_size,
            markers,
        })
    }

    /// Looks up a marker by id.
    #[must_use]
    pub fn marker(&self, id: MarkerId) -> Option<&PlacedMarker> {
        self.markers.get(id.0)
    }
}

fn place_marker(id: MarkerId, source: &MarkerSource, base_dir: &Path) -> PlacedMarker {
    let (icon, icon_size) = match &source.icon {
        Some(relative) => {
            let path = base_dir.join(relative);
            match image_size(&path) {
                Ok(size) => (Some(path), size),
                Err(err) => {
                    tracing::warn!("marker {} icon unavailable: {err}", id.0);
                    (None, marker::fallback_icon_size())
                }
            }
        }
        None => (None, marker::fallback_icon_size()),
    };

    let descriptor = source.resolve(id, base_dir);
    if descriptor.is_none() {
        tracing::debug!("marker {} has no audio and is not interactive", id.0);
    }

    PlacedMarker {
        id,
        anchor: Point::new(source.x.clamp(0.0, 1.0), source.y.clamp(0.0, 1.0)),
        title: source.title.clone().filter(|t| !t.trim().is_empty()),
        icon,
        icon_size,
        descriptor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_png(path: &Path, width: u32, height: u32) {
        image_rs::RgbaImage::new(width, height)
            .save(path)
            .expect("failed to write png");
    }

    #[test]
    fn parse_rejects_missing_image() {
        let err = SceneFile::parse("[[markers]]\nx = 0.1\ny = 0.2\n").unwrap_err();
        assert!(matches!(err, Error::Scene(_)));
    }

    #[test]
    fn load_resolves_paths_and_sizes() {
        let dir = tempdir().expect("failed to create temp dir");
        write_png(&dir.path().join("map.png"), 40, 20);
        write_png(&dir.path().join("icon.png"), 4, 2);
        let scene_path = dir.path().join("scene.toml");
        fs::write(
            &scene_path,
            r#"
image = "map.png"

[[markers]]
x = 0.25
y = 0.5
icon = "icon.png"
title = "Library"
audio = "library.mp3"

[[markers]]
x = 1.5
y = -1.0
title = "Gate"
"#,
        )
        .expect("failed to write scene");

        let scene = Scene::load(&scene_path).expect("scene should load");

        assert_eq!(scene.image_size, Size::new(40.0, 20.0));
        assert_eq!(scene.markers.len(), 2);

        let library = scene.marker(MarkerId(0)).expect("first marker");
        assert_eq!(library.icon_size, Size::new(4.0, 2.0));
        let descriptor = library.descriptor.as_ref().expect("interactive");
        assert_eq!(
            descriptor.tracks.get(0).map(|t| t.source.clone()),
            Some(dir.path().join("library.mp3"))
        );

        let gate = scene.marker(MarkerId(1)).expect("second marker");
        assert!(!gate.is_interactive());
        assert_eq!(gate.anchor, Point::new(1.0, 0.0));
    }

    #[test]
    fn missing_icon_falls_back_to_disc() {
        let dir = tempdir().expect("failed to create temp dir");
        write_png(&dir.path().join("map.png"), 10, 10);
        let file = SceneFile::parse(
            "image = \"map.png\"\n[[markers]]\nx = 0.5\ny = 0.5\nicon = \"nope.png\"\naudio = \"a.mp3\"\n",
        )
        .expect("valid scene");

        let scene = Scene::from_file(file, dir.path()).expect("scene should load");
        let marker = &scene.markers[0];
        assert!(marker.icon.is_none());
        assert_eq!(marker.icon_size, marker::fallback_icon_size());
    }

    #[test]
    fn missing_background_is_an_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let file = SceneFile::parse("image = \"absent.png\"\n").expect("valid scene");
        assert!(matches!(
            Scene::from_file(file, dir.path()),
            Err(Error::Scene(_))
        ));
    }
}
