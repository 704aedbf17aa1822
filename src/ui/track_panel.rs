// SPDX-License-Identifier: MPL-2.0
//! Track panel view: one button per visible track row.

use crate::audio::{RowIcon, TrackPanel};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, text, Column, Row, Space};
use iced::{alignment, Element, Length};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// A track row was pressed.
    TrackPressed(usize),
}

fn glyph(icon: RowIcon) -> &'static str {
    match icon {
        RowIcon::Play => "▶",
        RowIcon::Pause => "❚❚",
    }
}

pub fn view(panel: &TrackPanel) -> Element<'_, Message> {
    if !panel.is_visible() {
        return Space::new().into();
    }

    let rows = panel
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| row.visible)
        .fold(Column::new().spacing(spacing::XS), |column, (index, row)| {
            let content = Row::new()
                .spacing(spacing::XS)
                .align_y(alignment::Vertical::Center)
                .push(text(glyph(row.icon)).size(typography::BODY))
                .push(text(row.label.as_str()).size(typography::BODY));
            column.push(
                button(content)
                    .on_press(Message::TrackPressed(index))
                    .width(Length::Fill)
                    .height(Length::Fixed(sizing::BUTTON_HEIGHT))
                    .style(styles::button::track(row.icon == RowIcon::Pause)),
            )
        });

    let card = container(rows)
        .width(Length::Fixed(sizing::PANEL_WIDTH))
        .padding(spacing::SM)
        .style(styles::container::panel);

    container(card)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .padding(spacing::MD)
        .into()
}
