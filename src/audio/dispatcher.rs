// SPDX-License-Identifier: MPL-2.0
//! Marker dispatcher: decides what plays when a marker is activated.

use super::player::TrackPlayer;
use super::MediaBackend;
use crate::scene::{MarkerDescriptor, MarkerId, TrackList};
use rand::rngs::ThreadRng;
use rand::Rng;

/// Routes marker activations and track-row presses to the player.
pub struct MarkerDispatcher<B: MediaBackend, R = ThreadRng> {
    player: TrackPlayer<B>,
    active_marker: Option<MarkerId>,
    rng: R,
}

impl<B: MediaBackend> MarkerDispatcher<B> {
    /// Creates a dispatcher picking dual-track starts with the thread RNG.
    pub fn new(backend: B) -> Self {
        Self::with_rng(backend, rand::rng())
    }
}

impl<B: MediaBackend, R: Rng> MarkerDispatcher<B, R> {
    pub fn with_rng(backend: B, rng: R) -> Self {
        Self {
            player: TrackPlayer::new(backend),
            active_marker: None,
            rng,
        }
    }

    /// Activates a marker: stops whatever plays, loads the marker's tracks
    /// and starts one. Dual-track markers start on a uniformly random track.
    ///
    /// Returns the index of the track started.
    pub fn activate(&mut self, marker: &MarkerDescriptor) -> usize {
        self.stop_audio();
        let index = match marker.tracks {
            TrackList::Single(_) => 0,
            TrackList::Dual(_) => self.rng.random_range(0..2),
        };
        tracing::info!(marker = marker.id.0, label = %marker.label, index, "marker activated");

        self.player.load(marker.tracks.clone());
        self.active_marker = Some(marker.id);
        self.player.play_track(index);
        index
    }

    /// Forwards a track-row press to the player.
    pub fn play_track(&mut self, index: usize) {
        self.player.play_track(index);
    }

    /// Stops playback and forgets the active marker and its tracks.
    pub fn stop_audio(&mut self) {
        self.player.stop();
        self.active_marker = None;
    }

    /// Processes pending end-of-media notifications.
    pub fn poll_finished(&mut self) -> bool {
        self.player.poll_finished()
    }

    /// Most recently activated marker.
    #[must_use]
    pub fn active_marker(&self) -> Option<MarkerId> {
        self.active_marker
    }

    /// Marker to draw as playing: the active marker while its track plays.
    #[must_use]
    pub fn highlighted_marker(&self) -> Option<MarkerId> {
        self.active_marker.filter(|_| self.player.is_playing())
    }

    #[must_use]
    pub fn player(&self) -> &TrackPlayer<B> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut TrackPlayer<B> {
        &mut self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Track;
    use crate::test_utils::{live_handles, FakeBackend};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;

    fn track(name: &str) -> Track {
        Track {
            name: name.to_string(),
            source: PathBuf::from(format!("{name}.mp3")),
        }
    }

    fn single(id: usize, name: &str) -> MarkerDescriptor {
        MarkerDescriptor {
            id: MarkerId(id),
            label: name.to_string(),
            tracks: TrackList::Single(track(name)),
        }
    }

    fn dual(id: usize) -> MarkerDescriptor {
        MarkerDescriptor {
            id: MarkerId(id),
            label: "street".to_string(),
            tracks: TrackList::Dual([track("day"), track("night")]),
        }
    }

    fn dispatcher(seed: u64) -> MarkerDispatcher<FakeBackend, StdRng> {
        MarkerDispatcher::with_rng(FakeBackend::default(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn single_marker_plays_first_track() {
        let mut dispatcher = dispatcher(1);
        assert_eq!(dispatcher.activate(&single(0, "library")), 0);

        let panel = dispatcher.player().panel();
        assert!(panel.is_visible());
        assert!(!panel.rows()[1].visible);
        assert_eq!(panel.rows()[0].label, "library");
        assert_eq!(dispatcher.highlighted_marker(), Some(MarkerId(0)));
    }

    #[test]
    fn dual_marker_starts_on_chosen_track() {
        let mut dispatcher = dispatcher(7);
        let index = dispatcher.activate(&dual(2));

        assert!(index < 2);
        assert_eq!(dispatcher.player().active_index(), Some(index));
        assert_eq!(dispatcher.player().panel().playing_row(), Some(index));
        assert!(dispatcher.player().panel().rows()[1].visible);
    }

    #[test]
    fn dual_marker_choice_is_roughly_uniform() {
        let mut dispatcher = dispatcher(42);
        let marker = dual(0);
        let trials = 2000;
        let mut second = 0;
        for _ in 0..trials {
            second += dispatcher.activate(&marker);
        }
        let ratio = second as f64 / f64::from(trials);
        assert!((0.4..=0.6).contains(&ratio), "ratio was {ratio}");
    }

    #[test]
    fn activating_another_marker_replaces_playback() {
        let mut dispatcher = dispatcher(3);
        let log = dispatcher.player_mut().backend_mut().log();

        dispatcher.activate(&single(0, "a"));
        dispatcher.activate(&single(1, "b"));

        assert_eq!(live_handles(&log), 1);
        assert_eq!(dispatcher.active_marker(), Some(MarkerId(1)));
        let entries = log.borrow();
        assert!(entries[0].released);
        assert_eq!(entries[1].source, PathBuf::from("b.mp3"));
    }

    #[test]
    fn reactivating_same_marker_restarts() {
        let mut dispatcher = dispatcher(3);
        let log = dispatcher.player_mut().backend_mut().log();

        dispatcher.activate(&single(0, "a"));
        dispatcher.activate(&single(0, "a"));

        assert_eq!(log.borrow().len(), 2);
        assert!(dispatcher.player().is_playing());
    }

    #[test]
    fn pause_clears_highlight() {
        let mut dispatcher = dispatcher(5);
        dispatcher.activate(&single(4, "a"));
        dispatcher.play_track(0);

        assert_eq!(dispatcher.highlighted_marker(), None);
        assert_eq!(dispatcher.active_marker(), Some(MarkerId(4)));
    }

    #[test]
    fn stop_audio_is_safe_when_idle() {
        let mut dispatcher = dispatcher(5);
        dispatcher.stop_audio();
        dispatcher.activate(&single(0, "a"));
        dispatcher.stop_audio();
        dispatcher.stop_audio();
        assert!(!dispatcher.player().is_playing());
        assert_eq!(dispatcher.highlighted_marker(), None);
        assert_eq!(dispatcher.active_marker(), None);
        assert!(!dispatcher.player().panel().is_visible());
    }
}
