// SPDX-License-Identifier: MPL-2.0
//! Button styles for the zoom controls and track rows.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Translucent overlay button floating above the map.
pub fn overlay(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_HOVER,
        button::Status::Pressed => opacity::OVERLAY_PRESSED,
        _ => opacity::OVERLAY_MEDIUM,
    };

    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        text_color: WHITE,
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        shadow: shadow::SM,
        snap: true,
    }
}

/// Track row button; the playing row uses the brand color.
pub fn track(playing: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let is_light = matches!(theme, Theme::Light);
        let (background, text_color) = match (playing, status) {
            (true, button::Status::Hovered) => (palette::PRIMARY_400, WHITE),
            (true, _) => (palette::PRIMARY_500, WHITE),
            (false, button::Status::Hovered) if is_light => (palette::GRAY_200, palette::GRAY_900),
            (false, button::Status::Hovered) => (Color::from_rgb(0.35, 0.35, 0.35), WHITE),
            (false, _) if is_light => (WHITE, palette::GRAY_900),
            (false, _) => (palette::GRAY_700, WHITE),
        };

        button::Style {
            background: Some(Background::Color(background)),
            text_color,
            border: Border {
                color: if playing {
                    palette::PRIMARY_600
                } else {
                    palette::GRAY_200
                },
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::SM,
            snap: true,
        }
    }
}
