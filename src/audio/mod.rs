// SPDX-License-Identifier: MPL-2.0
//! Audio selection and playback.
//!
//! The [`MarkerDispatcher`] turns a marker activation into track choices and
//! drives a [`TrackPlayer`], which owns at most one media handle at a time.
//! Media access goes through the [`MediaBackend`] seam; [`DeviceBackend`]
//! is the real implementation (FFmpeg decoding, cpal output).

pub mod backend;
pub mod decoder;
pub mod dispatcher;
pub mod output;
pub mod panel;
pub mod player;

pub use backend::DeviceBackend;
pub use dispatcher::MarkerDispatcher;
pub use panel::{RowIcon, TrackPanel, TrackRow};
pub use player::TrackPlayer;

use crate::error::Result;
use std::path::Path;

/// Identity of an opened media handle, unique per backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(pub u64);

/// A loaded media source that can be started, paused and rewound.
///
/// Dropping the handle releases the media.
pub trait MediaHandle {
    fn id(&self) -> HandleId;

    /// Starts or resumes playback from the current position.
    fn play(&mut self);

    /// Pauses playback, keeping the position.
    fn pause(&mut self);

    /// Moves the playback position back to the start.
    fn rewind(&mut self);

    fn is_paused(&self) -> bool;
}

/// Opens media sources and reports when they finish.
pub trait MediaBackend {
    type Handle: MediaHandle;

    /// Opens a source. The handle starts paused at position zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be opened.
    fn open(&mut self, source: &Path) -> Result<Self::Handle>;

    /// Handles that reached the end of their media since the last call.
    fn drain_finished(&mut self) -> Vec<HandleId>;
}
