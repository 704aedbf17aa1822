// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::{Message, Screen};
use crate::audio::TrackPanel;
use crate::scene::MarkerId;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::track_panel;
use iced::widget::{container, text, Column, Stack};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub screen: &'a Screen,
    pub panel: &'a TrackPanel,
    pub highlighted: Option<MarkerId>,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    match ctx.screen {
        Screen::Map { scene, viewer } => Stack::new()
            .push(viewer.view(scene, ctx.highlighted).map(Message::Viewer))
            .push(track_panel::view(ctx.panel).map(Message::TrackPanel))
            .into(),
        Screen::Failed(details) => error_view(details),
    }
}

fn error_view(details: &str) -> Element<'_, Message> {
    let content = Column::new()
        .spacing(spacing::XS)
        .push(text("Could not load the scene").size(typography::GLYPH))
        .push(text(details).size(typography::BODY));

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center(Length::Fill)
        .padding(spacing::LG)
        .into()
}
