// SPDX-License-Identifier: MPL-2.0
//! Track panel state: the one or two rows with a label and a play/pause icon.

/// Icon shown on a track row's button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowIcon {
    /// Track is not playing; pressing starts it.
    #[default]
    Play,
    /// Track is playing; pressing pauses it.
    Pause,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackRow {
    pub visible: bool,
    pub label: String,
    pub icon: RowIcon,
}

/// State of the track controls shown after a marker is activated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackPanel {
    visible: bool,
    rows: [TrackRow; 2],
}

impl TrackPanel {
    /// Shows only the first row.
    pub fn show_single(&mut self, name: &str) {
        self.visible = true;
        self.rows[0].visible = true;
        self.rows[0].label = name.to_string();
        self.rows[1].visible = false;
    }

    /// Shows both rows.
    pub fn show_dual(&mut self, first: &str, second: &str) {
        self.visible = true;
        self.rows[0].visible = true;
        self.rows[0].label = first.to_string();
        self.rows[1].visible = true;
        self.rows[1].label = second.to_string();
    }

    /// Marks `index` as playing or not. Every row is reset to
    /// [`RowIcon::Play`] first, so at most one row ever shows a pause icon.
    pub fn set_playing(&mut self, index: usize, playing: bool) {
        self.clear_icons();
        if playing {
            if let Some(row) = self.rows.get_mut(index) {
                row.icon = RowIcon::Pause;
            }
        }
    }

    /// Resets every row to [`RowIcon::Play`].
    pub fn clear_icons(&mut self) {
        for row in &mut self.rows {
            row.icon = RowIcon::Play;
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn rows(&self) -> &[TrackRow; 2] {
        &self.rows
    }

    /// Index of the row showing a pause icon.
    #[must_use]
    pub fn playing_row(&self) -> Option<usize> {
        self.rows.iter().position(|row| row.icon == RowIcon::Pause)
    }
}
