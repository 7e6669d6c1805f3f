// SPDX-License-Identifier: MPL-2.0
//! Toast overlay: positions every toast of a [`Toaster`] over the window.
//!
//! Each toast sits in its own full-size layer aligned to its position, and
//! is pushed away from the anchored edge by its stacking offset. Hovering a
//! toast pauses every countdown of the toaster. Toast bars are wrapped in a
//! sensor that reports their rendered height, which feeds the offsets.

use super::toast_bar;
use crate::toast::{Justify, Style, ToastId, ToastLayout, ToastType, Toaster, VerticalAnchor};
use iced::widget::{container, mouse_area, sensor, Container, Stack};
use iced::{alignment, Element, Length, Padding, Size, Theme};

/// Overlay interactions.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Dismiss(ToastId),
    PauseStarted,
    PauseEnded,
    /// Rendered height of a toast, in pixels.
    Measured(ToastId, f32),
}

/// Renders a toast from its layout, replacing the built-in toast bar.
///
/// Custom toasts never go through the renderer; their message is drawn as-is.
pub type Renderer<'a, M> = &'a dyn Fn(&ToastLayout<M>) -> Element<'a, Message>;

/// Applies an overlay message to `toaster`.
pub fn update<M: Clone + Send + Sync + 'static>(toaster: &Toaster<M>, message: &Message) {
    match message {
        Message::Dismiss(id) => {
            // The hovered toast disappears without an exit event.
            toaster.end_pause();
            toaster.store().dismiss(Some(id));
        }
        Message::PauseStarted => toaster.start_pause(),
        Message::PauseEnded => toaster.end_pause(),
        Message::Measured(id, height) => {
            let unchanged = toaster
                .toasts()
                .iter()
                .any(|t| t.id == *id && t.height == Some(*height));
            if !unchanged {
                toaster.update_height(id, *height);
            }
        }
    }
}

/// Builds the overlay for `toaster`.
///
/// Dismissed toasts are not drawn; they only linger in the store for the
/// exit grace period. Every drawn toast reports its height when it appears
/// and whenever it changes size.
pub fn view_overlay<'a, M>(
    toaster: &Toaster<M>,
    renderer: Option<Renderer<'a, M>>,
) -> Element<'a, Message>
where
    M: AsRef<str> + Clone + Send + Sync + 'static,
{
    let container_offset = toaster.options().container_offset;
    let layers: Vec<Element<'a, Message>> = toaster
        .layout()
        .iter()
        .filter(|layout| layout.active)
        .map(|layout| {
            let on_show = measure(layout.toast.id.clone());
            let on_resize = measure(layout.toast.id.clone());
            let measured = sensor(toast_content(layout, renderer))
                .on_show(on_show)
                .on_resize(on_resize)
                .key(layout.toast.id.clone());
            let hoverable = mouse_area(measured)
                .on_enter(Message::PauseStarted)
                .on_exit(Message::PauseEnded);

            Container::new(hoverable)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(horizontal(layout.placement.justify))
                .align_y(vertical(layout.placement.anchor))
                .padding(layer_padding(layout, container_offset))
                .into()
        })
        .collect();

    let container_style = toaster.options().container_style.clone();
    Container::new(
        Stack::with_children(layers)
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(move |theme: &Theme| overlay_style(theme, &container_style))
    .into()
}

fn measure(id: ToastId) -> impl Fn(Size) -> Message {
    move |size: Size| Message::Measured(id.clone(), size.height)
}

fn toast_content<'a, M: AsRef<str>>(
    layout: &ToastLayout<M>,
    renderer: Option<Renderer<'a, M>>,
) -> Element<'a, Message> {
    match renderer {
        Some(render) if accepts_renderer(layout) => render(layout),
        _ => toast_bar::view(&layout.toast),
    }
}

fn accepts_renderer<M>(layout: &ToastLayout<M>) -> bool {
    layout.toast.kind != ToastType::Custom
}

fn overlay_style(_theme: &Theme, style: &Style) -> container::Style {
    container::Style {
        background: toast_bar::style_color(style, "background").map(iced::Background::Color),
        text_color: toast_bar::style_color(style, "color"),
        ..Default::default()
    }
}

fn horizontal(justify: Justify) -> alignment::Horizontal {
    match justify {
        Justify::Start => alignment::Horizontal::Left,
        Justify::Center => alignment::Horizontal::Center,
        Justify::End => alignment::Horizontal::Right,
    }
}

fn vertical(anchor: VerticalAnchor) -> alignment::Vertical {
    match anchor {
        VerticalAnchor::Top => alignment::Vertical::Top,
        VerticalAnchor::Bottom => alignment::Vertical::Bottom,
    }
}

/// Padding placing a toast `container_offset` from the window edges plus
/// its stacking offset from the anchored edge.
fn layer_padding<M>(layout: &ToastLayout<M>, container_offset: f32) -> Padding {
    let shift = layout.placement.translate_y.abs();
    let (top, bottom) = match layout.placement.anchor {
        VerticalAnchor::Top => (container_offset + shift, container_offset),
        VerticalAnchor::Bottom => (container_offset, container_offset + shift),
    };
    Padding {
        top,
        right: container_offset,
        bottom,
        left: container_offset,
    }
}
