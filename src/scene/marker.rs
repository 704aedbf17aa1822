// SPDX-License-Identifier: MPL-2.0
//! Hotspot markers: declarative source data, resolved descriptors and
//! placement on the map.

use crate::config::FALLBACK_MARKER_SIZE;
use crate::ui::state::layout;
use crate::ui::state::ViewportState;
use iced::{Point, Rectangle, Size};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name shown for the second track when the scene gives none.
pub const DEFAULT_SECOND_TRACK_NAME: &str = "Track 2";

/// Index of a marker within its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub usize);

/// One playable audio track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub source: PathBuf,
}

/// The one or two tracks attached to a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackList {
    Single(Track),
    Dual([Track; 2]),
}

impl TrackList {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Dual(_) => 2,
        }
    }

    /// Always false; a track list holds at least one track.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Track> {
        match (self, index) {
            (Self::Single(track), 0) => Some(track),
            (Self::Dual(tracks), i) => tracks.get(i),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        let slice: &[Track] = match self {
            Self::Single(track) => std::slice::from_ref(track),
            Self::Dual(tracks) => tracks,
        };
        slice.iter()
    }
}

/// Resolved, immutable description of an interactive marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerDescriptor {
    pub id: MarkerId,
    pub label: String,
    pub tracks: TrackList,
}

/// Marker entry as written in the scene file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MarkerSource {
    /// Horizontal center, as a fraction of the image width.
    pub x: f32,
    /// Vertical center, as a fraction of the image height.
    pub y: f32,
    #[serde(default)]
    pub icon: Option<PathBuf>,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub audio2: Option<String>,
    /// Explicit name of the first track.
    #[serde(default)]
    pub name: Option<String>,
    /// Explicit name of the second track.
    #[serde(default)]
    pub name2: Option<String>,
    /// Place title shown next to the marker.
    #[serde(default)]
    pub title: Option<String>,
    /// Alternative text of the marker icon.
    #[serde(default)]
    pub alt: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

impl MarkerSource {
    /// Display name: explicit name, then title, then icon alt text.
    #[must_use]
    pub fn display_name(&self) -> String {
        non_empty(self.name.as_ref())
            .or_else(|| non_empty(self.title.as_ref()))
            .or_else(|| non_empty(self.alt.as_ref()))
            .unwrap_or_default()
            .to_string()
    }

    /// Resolves the marker's tracks, with sources relative to `base_dir`.
    ///
    /// Returns `None` when the marker has no primary audio source, which
    /// leaves it on the map but not interactive.
    #[must_use]
    pub fn resolve(&self, id: MarkerId, base_dir: &Path) -> Option<MarkerDescriptor> {
        let audio = non_empty(self.audio.as_ref())?;
        let label = self.display_name();
        let first = Track {
            name: label.clone(),
            source: base_dir.join(audio),
        };

        let tracks = match non_empty(self.audio2.as_ref()) {
            Some(audio2) => TrackList::Dual([
                first,
                Track {
                    name: non_empty(self.name2.as_ref())
                        .unwrap_or(DEFAULT_SECOND_TRACK_NAME)
                        .to_string(),
                    source: base_dir.join(audio2),
                },
            ]),
            None => TrackList::Single(first),
        };

        Some(MarkerDescriptor { id, label, tracks })
    }
}

/// A marker placed on the map.
#[derive(Debug, Clone)]
pub struct PlacedMarker {
    pub id: MarkerId,
    /// Center as fractions of the image size.
    pub anchor: Point,
    /// Title drawn under the marker, if any.
    pub title: Option<String>,
    /// Icon image path, if the icon could be read.
    pub icon: Option<PathBuf>,
    /// Natural size of the icon (or the fallback disc).
    pub icon_size: Size,
    /// `None` for decorative markers without audio.
    pub descriptor: Option<MarkerDescriptor>,
}

impl PlacedMarker {
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.descriptor.is_some()
    }

    /// Marker rectangle in base-layout coordinates.
    #[must_use]
    pub fn base_bounds(&self, viewport: &ViewportState) -> Rectangle {
        let base = viewport.base_size();
        let size = layout::marker_size(self.icon_size, viewport.image_size(), base, viewport.axis());
        let center = Point::new(self.anchor.x * base.width, self.anchor.y * base.height);
        Rectangle::new(
            Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        )
    }

    /// Whether a viewport point lands on this marker.
    #[must_use]
    pub fn contains(&self, viewport: &ViewportState, point: Point) -> bool {
        self.base_bounds(viewport).contains(viewport.to_image(point))
    }
}

/// Natural size used for markers without an icon.
#[must_use]
pub fn fallback_icon_size() -> Size {
    Size::new(FALLBACK_MARKER_SIZE, FALLBACK_MARKER_SIZE)
}

/// Topmost interactive marker under a viewport point.
///
/// Later markers are drawn above earlier ones, so they win.
#[must_use]
pub fn hit_test<'a>(
    markers: &'a [PlacedMarker],
    viewport: &ViewportState,
    point: Point,
) -> Option<&'a PlacedMarker> {
    markers
        .iter()
        .rev()
        .find(|marker| marker.is_interactive() && marker.contains(viewport, point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutMode, ViewerConfig};

    fn source() -> MarkerSource {
        MarkerSource {
            x: 0.5,
            y: 0.5,
            audio: Some("a.mp3".into()),
            ..MarkerSource::default()
        }
    }

    #[test]
    fn marker_without_audio_is_not_interactive() {
        let marker = MarkerSource {
            audio: None,
            audio2: Some("b.mp3".into()),
            ..source()
        };
        assert!(marker.resolve(MarkerId(0), Path::new("/scene")).is_none());
    }

    #[test]
    fn blank_audio_counts_as_missing() {
        let marker = MarkerSource {
            audio: Some("  ".into()),
            ..source()
        };
        assert!(marker.resolve(MarkerId(0), Path::new("/scene")).is_none());
    }

    #[test]
    fn name_resolution_order() {
        let mut marker = MarkerSource {
            name: Some("Explicit".into()),
            title: Some("Title".into()),
            alt: Some("Alt".into()),
            ..source()
        };
        assert_eq!(marker.display_name(), "Explicit");
        marker.name = None;
        assert_eq!(marker.display_name(), "Title");
        marker.title = None;
        assert_eq!(marker.display_name(), "Alt");
        marker.alt = None;
        assert_eq!(marker.display_name(), "");
    }

    #[test]
    fn single_source_resolves_to_single_track() {
        let descriptor = MarkerSource {
            title: Some("Library".into()),
            ..source()
        }
        .resolve(MarkerId(3), Path::new("/scene"))
        .expect("marker should resolve");

        assert_eq!(descriptor.label, "Library");
        assert_eq!(descriptor.tracks.len(), 1);
        let track = descriptor.tracks.get(0).expect("track 0");
        assert_eq!(track.source, PathBuf::from("/scene/a.mp3"));
        assert!(descriptor.tracks.get(1).is_none());
    }

    #[test]
    fn second_source_resolves_to_dual_track_with_default_name() {
        let descriptor = MarkerSource {
            title: Some("Street".into()),
            audio2: Some("b.mp3".into()),
            ..source()
        }
        .resolve(MarkerId(1), Path::new("/scene"))
        .expect("marker should resolve");

        let names: Vec<_> = descriptor.tracks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Street", DEFAULT_SECOND_TRACK_NAME]);
    }

    #[test]
    fn hit_test_uses_scaled_marker_bounds() {
        let settings = ViewerConfig {
            layout: LayoutMode::Width,
            ..ViewerConfig::default()
        }
        .settings();
        let mut viewport = ViewportState::new(&settings, Size::new(1000.0, 1000.0));
        viewport.resize(Size::new(1000.0, 1000.0));

        let markers = vec![PlacedMarker {
            id: MarkerId(0),
            anchor: Point::new(0.5, 0.5),
            title: None,
            icon: None,
            icon_size: Size::new(100.0, 100.0),
            descriptor: source().resolve(MarkerId(0), Path::new(".")),
        }];

        // Base 1000x1000, marker 150x150 centered at (500, 500); scale 0.7 centered.
        let center = viewport.center();
        assert!(hit_test(&markers, &viewport, center).is_some());
        assert!(hit_test(&markers, &viewport, Point::new(600.0, 500.0)).is_none());
    }
}
