// SPDX-License-Identifier: MPL-2.0
//! Demo window layout: trigger buttons with the toast overlay on top.

use super::Message;
use crate::toast::{ToastType, Toaster};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::{styles, toast_bar, toaster};
use iced::widget::{button, Column, Container, Row, Stack, Text};
use iced::{alignment, Color, Element, Length};

pub fn view(toaster: &Toaster<String>) -> Element<'_, Message> {
    let triggers = ToastType::ALL.into_iter().fold(
        Row::new().spacing(spacing::XS),
        |row, kind| row.push(trigger(kind)),
    );

    let actions = Row::new()
        .spacing(spacing::XS)
        .push(
            button(Text::new("Track upload").size(typography::BODY))
                .on_press(Message::ShowPromise)
                .height(Length::Fixed(sizing::BUTTON_HEIGHT))
                .style(styles::primary),
        )
        .push(
            button(Text::new("Dismiss all").size(typography::BODY))
                .on_press(Message::DismissAll)
                .height(Length::Fixed(sizing::BUTTON_HEIGHT))
                .style(styles::outlined(palette::GRAY_400)),
        )
        .push(
            button(Text::new("Clear").size(typography::BODY))
                .on_press(Message::ClearAll)
                .height(Length::Fixed(sizing::BUTTON_HEIGHT))
                .style(styles::outlined(palette::GRAY_400)),
        );

    let status = Text::new(format!(
        "{} tracked, position {}{}",
        toaster.toasts().len(),
        toaster.options().position,
        if toaster.is_paused() { ", paused" } else { "" },
    ))
    .size(typography::CAPTION);

    let controls = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new("Iced Toast").size(typography::TITLE_MD))
        .push(triggers)
        .push(actions)
        .push(status);

    let base = Container::new(controls)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center);

    Stack::new()
        .push(base)
        .push(toaster::view_overlay(toaster, None).map(Message::Toaster))
        .into()
}

fn trigger<'a>(kind: ToastType) -> Element<'a, Message> {
    let label = match kind {
        ToastType::Blank => "Blank",
        ToastType::Success => "Success",
        ToastType::Error => "Error",
        ToastType::Loading => "Loading",
        ToastType::Custom => "Custom",
    };
    let accent: Color = toast_bar::accent_color(kind, None);

    button(Text::new(label).size(typography::BODY))
        .on_press(Message::Show(kind))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::outlined(accent))
        .into()
}
