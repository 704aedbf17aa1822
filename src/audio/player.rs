// SPDX-License-Identifier: MPL-2.0
//! Track player: owns the cached track list, the single active media
//! handle, and the panel state mirroring it.

use super::panel::TrackPanel;
use super::{HandleId, MediaBackend, MediaHandle};
use crate::scene::TrackList;

struct ActiveTrack<H> {
    index: usize,
    handle: H,
}

/// Plays one track at a time out of a marker's track list.
///
/// At most one handle exists at any moment. Opening a new track releases
/// the previous handle first.
pub struct TrackPlayer<B: MediaBackend> {
    backend: B,
    tracks: Option<TrackList>,
    active: Option<ActiveTrack<B::Handle>>,
    panel: TrackPanel,
}

impl<B: MediaBackend> TrackPlayer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            tracks: None,
            active: None,
            panel: TrackPanel::default(),
        }
    }

    /// Stops any playback, caches `tracks` and shows one panel row per track.
    pub fn load(&mut self, tracks: TrackList) {
        self.stop();
        match &tracks {
            TrackList::Single(track) => self.panel.show_single(&track.name),
            TrackList::Dual([first, second]) => self.panel.show_dual(&first.name, &second.name),
        }
        self.tracks = Some(tracks);
    }

    /// Toggles the active track, or switches to another one.
    ///
    /// On the active index this pauses or resumes in place. On any other
    /// index the current track is paused and rewound, then the new track is
    /// opened and played from the start. Out-of-range indices are ignored.
    pub fn play_track(&mut self, index: usize) {
        let Some(track) = self.tracks.as_ref().and_then(|t| t.get(index)).cloned() else {
            tracing::warn!(index, "no track at index");
            return;
        };

        if let Some(active) = self.active.as_mut().filter(|a| a.index == index) {
            if active.handle.is_paused() {
                active.handle.play();
                self.panel.set_playing(index, true);
                tracing::debug!(index, "track resumed");
            } else {
                active.handle.pause();
                self.panel.set_playing(index, false);
                tracing::debug!(index, "track paused");
            }
            return;
        }

        if let Some(mut previous) = self.active.take() {
            previous.handle.pause();
            previous.handle.rewind();
        }
        self.panel.clear_icons();

        match self.backend.open(&track.source) {
            Ok(mut handle) => {
                handle.play();
                tracing::info!(index, source = %track.source.display(), "track started");
                self.active = Some(ActiveTrack { index, handle });
                self.panel.set_playing(index, true);
            }
            Err(err) => {
                tracing::warn!(index, "track unavailable: {err}");
            }
        }
    }

    /// Pauses, rewinds and releases the active handle, then forgets the
    /// track list and hides the panel. Safe to call when idle.
    pub fn stop(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.handle.pause();
            active.handle.rewind();
            tracing::debug!(index = active.index, "track stopped");
        }
        self.tracks = None;
        self.panel = TrackPanel::default();
    }

    /// Handles an end-of-media notification.
    ///
    /// Notifications from handles that are no longer active are ignored.
    /// Returns whether the active track ended.
    pub fn handle_ended(&mut self, id: HandleId) -> bool {
        if self.active.as_ref().map(|a| a.handle.id()) != Some(id) {
            tracing::debug!(?id, "ignoring end of released track");
            return false;
        }
        if let Some(active) = self.active.take() {
            tracing::debug!(index = active.index, "track ended");
        }
        self.panel.clear_icons();
        true
    }

    /// Drains end notifications from the backend. Returns whether the
    /// active track ended.
    pub fn poll_finished(&mut self) -> bool {
        let finished = self.backend.drain_finished();
        let mut ended = false;
        for id in finished {
            ended |= self.handle_ended(id);
        }
        ended
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.index)
    }

    #[must_use]
    pub fn active_handle(&self) -> Option<&B::Handle> {
        self.active.as_ref().map(|a| &a.handle)
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.active.as_ref().is_some_and(|a| !a.handle.is_paused())
    }

    #[must_use]
    pub fn tracks(&self) -> Option<&TrackList> {
        self.tracks.as_ref()
    }

    #[must_use]
    pub fn panel(&self) -> &TrackPanel {
        &self.panel
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RowIcon;
    use crate::scene::Track;
    use crate::test_utils::{live_handles, FakeBackend};
    use std::path::PathBuf;

    fn track(name: &str) -> Track {
        Track {
            name: name.to_string(),
            source: PathBuf::from(format!("{name}.mp3")),
        }
    }

    fn dual_player() -> TrackPlayer<FakeBackend> {
        let mut player = TrackPlayer::new(FakeBackend::default());
        player.load(TrackList::Dual([track("a"), track("b")]));
        player
    }

    #[test]
    fn load_shows_rows_without_playing() {
        let player = dual_player();
        assert!(player.panel().is_visible());
        assert!(player.panel().rows()[1].visible);
        assert_eq!(player.active_index(), None);
        assert!(!player.is_playing());
    }

    #[test]
    fn play_opens_and_starts_track() {
        let mut player = dual_player();
        let log = player.backend_mut().log();

        player.play_track(1);

        assert_eq!(player.active_index(), Some(1));
        assert!(player.is_playing());
        assert_eq!(player.panel().playing_row(), Some(1));
        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].source, PathBuf::from("b.mp3"));
        assert!(!log[0].paused);
    }

    #[test]
    fn same_index_toggles_without_reset() {
        let mut player = dual_player();
        let log = player.backend_mut().log();

        player.play_track(0);
        player.backend_mut().advance(7);
        player.play_track(0);

        assert!(!player.is_playing());
        assert_eq!(player.active_index(), Some(0));
        assert_eq!(player.panel().rows()[0].icon, RowIcon::Play);
        assert_eq!(log.borrow()[0].position, 7);

        player.play_track(0);
        assert!(player.is_playing());
        assert_eq!(log.borrow()[0].position, 7);
        assert_eq!(log.borrow().len(), 1, "toggle must not reopen");
    }

    #[test]
    fn switching_rewinds_and_releases_previous() {
        let mut player = dual_player();
        let log = player.backend_mut().log();

        player.play_track(0);
        player.backend_mut().advance(3);
        player.play_track(1);

        let entries = log.borrow().clone();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].paused);
        assert_eq!(entries[0].position, 0);
        assert!(entries[0].released);
        assert!(!entries[1].paused);
        assert_eq!(live_handles(&log), 1);
        assert_eq!(player.panel().playing_row(), Some(1));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut player = dual_player();
        let log = player.backend_mut().log();

        player.stop();
        player.play_track(0);
        player.stop();
        player.stop();

        assert_eq!(player.active_index(), None);
        assert_eq!(live_handles(&log), 0);
        assert_eq!(log.borrow()[0].rewinds, 1);
        assert_eq!(player.panel().playing_row(), None);
        assert!(!player.panel().is_visible());
        assert!(player.tracks().is_none());

        // Without a cached list, row presses do nothing.
        player.play_track(0);
        assert_eq!(player.active_index(), None);
    }

    #[test]
    fn stale_end_notification_is_ignored() {
        let mut player = dual_player();
        player.play_track(0);
        let first = player.active_handle().map(MediaHandle::id).expect("active");
        player.play_track(1);

        player.backend_mut().finish(first);
        assert!(!player.poll_finished());
        assert_eq!(player.active_index(), Some(1));
        assert!(player.is_playing());
    }

    #[test]
    fn natural_end_clears_active_track() {
        let mut player = dual_player();
        player.play_track(1);
        let id = player.active_handle().map(MediaHandle::id).expect("active");

        player.backend_mut().finish(id);
        assert!(player.poll_finished());
        assert_eq!(player.active_index(), None);
        assert_eq!(player.panel().playing_row(), None);

        // Pressing the same row again starts from the beginning.
        player.play_track(1);
        assert_eq!(player.active_index(), Some(1));
    }

    #[test]
    fn open_failure_leaves_player_idle() {
        let mut player = dual_player();
        player.backend_mut().fail_on("b.mp3");

        player.play_track(0);
        player.play_track(1);

        assert_eq!(player.active_index(), None);
        assert_eq!(player.panel().playing_row(), None);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut player = TrackPlayer::new(FakeBackend::default());
        player.load(TrackList::Single(track("a")));
        player.play_track(0);
        player.play_track(1);
        assert_eq!(player.active_index(), Some(0));
        assert!(player.is_playing());
    }
}
