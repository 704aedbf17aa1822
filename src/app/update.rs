// SPDX-License-Identifier: MPL-2.0
//! Glue between gesture effects and the marker dispatcher.

use crate::audio::{MarkerDispatcher, MediaBackend};
use crate::scene::{hit_test, MarkerId, Scene};
use crate::ui::state::ViewportState;
use iced::Point;
use rand::Rng;

/// Activates the topmost interactive marker under a tap.
///
/// Returns the activated marker, or `None` when the tap hit empty map.
pub fn activate_at<B: MediaBackend, R: Rng>(
    scene: &Scene,
    viewport: &ViewportState,
    dispatcher: &mut MarkerDispatcher<B, R>,
    position: Point,
) -> Option<MarkerId> {
    let marker = hit_test(&scene.markers, viewport, position)?;
    let descriptor = marker.descriptor.as_ref()?;
    dispatcher.activate(descriptor);
    Some(marker.id)
}
