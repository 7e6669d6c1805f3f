// SPDX-License-Identifier: MPL-2.0
//! Toast bar widget for rendering a single toast.
//!
//! Toasts are drawn as small cards with a type-colored accent, a status
//! glyph and a dismiss button. Custom toasts skip the card and render their
//! message as-is.

use super::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing, typography};
use super::toaster::Message;
use crate::toast::{IconTheme, Style, Toast, ToastType};
use iced::widget::{button, container, text, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Renders `toast` as a toast bar.
pub fn view<'a, M: AsRef<str>>(toast: &Toast<M>) -> Element<'a, Message> {
    let message = message_text(toast.message.as_ref(), toast.style.get("color"));

    if toast.kind == ToastType::Custom {
        return Container::new(message).into();
    }

    let accent = accent_color(toast.kind, toast.icon_theme.as_ref());
    let mut content = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center);

    let glyph = toast
        .icon
        .as_ref()
        .map(|icon| icon.as_ref().to_string())
        .or_else(|| status_glyph(toast.kind).map(str::to_string));
    if let Some(glyph) = glyph {
        content = content.push(
            Container::new(Text::new(glyph).size(sizing::ICON_SM).color(accent))
                .width(Length::Fixed(sizing::ICON_MD))
                .align_x(alignment::Horizontal::Center)
                .padding(spacing::XXS),
        );
    }

    let dismiss_button = button(text("\u{2715}").size(typography::CAPTION))
        .on_press(Message::Dismiss(toast.id.clone()))
        .padding(spacing::XXS)
        .style(dismiss_button_style);

    content = content
        .push(
            Container::new(message)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Left),
        )
        .push(dismiss_button);

    let background = style_color(&toast.style, "background");
    Container::new(content)
        .width(Length::Fixed(sizing::TOAST_WIDTH))
        .padding(spacing::SM)
        .style(move |theme: &Theme| toast_container_style(theme, accent, background))
        .into()
}

fn message_text<'a>(message: &str, color: Option<&str>) -> Text<'a> {
    let color = color.and_then(parse_color);
    Text::new(message.to_string())
        .size(typography::BODY)
        .style(move |theme: &Theme| text::Style {
            color: Some(color.unwrap_or(theme.palette().text)),
        })
}

/// Glyph drawn for toast types that carry a status icon.
#[must_use]
pub fn status_glyph(kind: ToastType) -> Option<&'static str> {
    match kind {
        ToastType::Success => Some("\u{2714}"),
        ToastType::Error => Some("\u{2716}"),
        ToastType::Loading => Some("\u{21bb}"),
        ToastType::Blank | ToastType::Custom => None,
    }
}

/// Accent color of a toast: the icon theme's primary color when it parses,
/// otherwise the type's status color.
#[must_use]
pub fn accent_color(kind: ToastType, icon_theme: Option<&IconTheme>) -> Color {
    if let Some(color) = icon_theme.and_then(|theme| parse_color(&theme.primary)) {
        return color;
    }
    match kind {
        ToastType::Success => palette::SUCCESS_500,
        ToastType::Error => palette::ERROR_500,
        ToastType::Loading => palette::INFO_500,
        ToastType::Blank | ToastType::Custom => palette::GRAY_200,
    }
}

/// Reads a color-valued style property such as `background`.
#[must_use]
pub fn style_color(style: &Style, property: &str) -> Option<Color> {
    style.get(property).and_then(parse_color)
}

/// Parses a CSS color: `#rgb`, `#rrggbb`, `#rrggbbaa` or a basic name.
#[must_use]
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    match value.to_ascii_lowercase().as_str() {
        "black" => Some(Color::BLACK),
        "white" => Some(Color::WHITE),
        "transparent" => Some(Color::TRANSPARENT),
        "red" => Some(Color::from_rgb8(0xFF, 0x00, 0x00)),
        "green" => Some(Color::from_rgb8(0x00, 0x80, 0x00)),
        "blue" => Some(Color::from_rgb8(0x00, 0x00, 0xFF)),
        "gray" | "grey" => Some(Color::from_rgb8(0x80, 0x80, 0x80)),
        _ => None,
    }
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    let short = |i: usize| {
        u8::from_str_radix(&hex[i..=i], 16)
            .ok()
            .map(|nibble| nibble * 0x11)
    };

    match hex.len() {
        3 => Some(Color::from_rgb8(short(0)?, short(1)?, short(2)?)),
        6 => Some(Color::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        8 => Some(Color::from_rgba8(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            f32::from(channel(6..8)?) / 255.0,
        )),
        _ => None,
    }
}

fn toast_container_style(theme: &Theme, accent: Color, background: Option<Color>) -> container::Style {
    let bg_color = background.unwrap_or(theme.extended_palette().background.base.color);

    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: accent,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let hover = |alpha: f32| button::Style {
        background: Some(iced::Background::Color(Color {
            a: alpha,
            ..palette::GRAY_400
        })),
        text_color: base.text,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    };

    match status {
        button::Status::Active => button::Style {
            background: None,
            text_color: base.text,
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered => hover(opacity::OVERLAY_SUBTLE),
        button::Status::Pressed => hover(opacity::OVERLAY_MEDIUM),
        button::Status::Disabled => button::Style {
            background: None,
            text_color: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..base.text
            },
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}
