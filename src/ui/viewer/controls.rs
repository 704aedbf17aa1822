// SPDX-License-Identifier: MPL-2.0
//! Zoom buttons floating in the bottom-right corner of the map.

use super::gesture::Message;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, text, Column};
use iced::{alignment, Element, Length};

fn zoom_button(label: &str, message: Message) -> Element<'_, Message> {
    button(
        text(label)
            .size(typography::GLYPH)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .on_press(message)
    .width(Length::Fixed(sizing::ZOOM_BUTTON))
    .height(Length::Fixed(sizing::ZOOM_BUTTON))
    .style(styles::button::overlay)
    .into()
}

pub fn view<'a>() -> Element<'a, Message> {
    let buttons = Column::new()
        .spacing(spacing::XS)
        .push(zoom_button("+", Message::ZoomIn))
        .push(zoom_button("-", Message::ZoomOut))
        .push(zoom_button("Fit", Message::FitToScreen));

    container(buttons)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .align_y(alignment::Vertical::Bottom)
        .padding(spacing::MD)
        .into()
}
