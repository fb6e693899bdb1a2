// SPDX-License-Identifier: MPL-2.0
//! Iced rendering of the curtain overlay.
//!
//! The view is a pure function of the controller: panels are laid out with
//! proportional widths driven by [`Controller::open_progress`], particles are
//! placed with proportional spacers, and the whole overlay is wrapped in an
//! opaque layer so the page underneath receives no input while it is live.

use super::controller::Controller;
use super::overlay::{Overlay, Panel};
use super::particles::Particle;
use crate::config::Theme as CurtainTheme;
use crate::ui::design_tokens::{opacity, palette, radius, shadow, sizing, spacing, typography};
use iced::widget::image::Handle;
use iced::widget::{button, container, image, opaque, text, Column, Container, Row, Space, Stack};
use iced::{alignment, Background, Border, Color, ContentFit, Element, Length, Theme};
use std::time::Duration;

/// Colors used by one curtain theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub panel: Color,
    pub panel_edge: Color,
    pub accent: Color,
    pub text: Color,
}

impl ThemeColors {
    #[must_use]
    pub fn of(theme: CurtainTheme) -> Self {
        match theme {
            CurtainTheme::Default => Self {
                panel: palette::CRIMSON_700,
                panel_edge: palette::CRIMSON_900,
                accent: palette::CHAMPAGNE,
                text: palette::WHITE,
            },
            CurtainTheme::Royal => Self {
                panel: palette::ROYAL_700,
                panel_edge: palette::ROYAL_900,
                accent: palette::GOLD_500,
                text: palette::WHITE,
            },
            CurtainTheme::Elegant => Self {
                panel: palette::ELEGANT_700,
                panel_edge: palette::ELEGANT_900,
                accent: palette::GRAY_100,
                text: palette::WHITE,
            },
            CurtainTheme::Gold => Self {
                panel: palette::GOLD_500,
                panel_edge: palette::GOLD_700,
                accent: palette::CRIMSON_700,
                text: palette::GRAY_900,
            },
        }
    }
}

/// Converts a 0.0–1.0 fraction into a layout portion.
fn portion(fraction: f32) -> u16 {
    (fraction.clamp(0.0, 1.0) * sizing::PORTION_SCALE).round() as u16
}

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color { a: alpha, ..color }
}

/// Renders the overlay, or nothing when no curtain is attached.
pub fn view<'a, Message: Clone + 'a>(
    controller: &'a Controller,
    on_open: Message,
) -> Element<'a, Message> {
    let Some(overlay) = controller.overlay() else {
        return Space::new().into();
    };

    let colors = ThemeColors::of(overlay.theme());
    let alpha = opacity::OPAQUE - controller.fade_progress();
    let now = controller.now();

    let mut layers = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(panels(overlay, controller.open_progress(), colors, alpha));

    for particle in overlay.particles() {
        layers = layers.push(particle_layer(particle, now, alpha));
    }

    if !overlay.is_opening() {
        layers = layers.push(content_box(overlay, colors, on_open));
    }

    opaque(layers)
}

fn panels<'a, Message: 'a>(
    overlay: &'a Overlay,
    progress: f32,
    colors: ThemeColors,
    alpha: f32,
) -> Element<'a, Message> {
    let closed = portion(1.0 - progress);
    let gap = portion(progress) * 2;

    let mut row = Row::new().width(Length::Fill).height(Length::Fill);
    if closed > 0 {
        row = row.push(panel(overlay.left(), closed, colors, alpha));
    }
    if gap > 0 {
        row = row.push(Space::new().width(Length::FillPortion(gap)));
    }
    if closed > 0 {
        row = row.push(panel(overlay.right(), closed, colors, alpha));
    }
    row.into()
}

fn panel<'a, Message: 'a>(
    panel: &'a Panel,
    width: u16,
    colors: ThemeColors,
    alpha: f32,
) -> Element<'a, Message> {
    let fill: Element<'a, Message> = match panel.image() {
        Some(path) => image(Handle::from_path(path))
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover)
            .into(),
        None => Space::new().width(Length::Fill).height(Length::Fill).into(),
    };

    Container::new(fill)
        .width(Length::FillPortion(width))
        .height(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(with_alpha(colors.panel, alpha))),
            border: Border {
                color: with_alpha(colors.panel_edge, alpha),
                width: spacing::XS / 2.0,
                radius: 0.0.into(),
            },
            ..Default::default()
        })
        .into()
}

fn particle_layer<'a, Message: 'a>(
    particle: &Particle,
    now: Duration,
    alpha: f32,
) -> Element<'a, Message> {
    let left = portion(particle.left_percent() / 100.0);
    let top = portion(particle.progress(now));
    let scale = portion(1.0);

    let dot = Container::new(
        Space::new()
            .width(Length::Fixed(sizing::SPARKLE))
            .height(Length::Fixed(sizing::SPARKLE)),
    )
    .style(move |_theme: &Theme| container::Style {
        background: Some(Background::Color(with_alpha(palette::SPARKLE, alpha))),
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        ..Default::default()
    });

    let line = Row::new()
        .width(Length::Fill)
        .push(Space::new().width(Length::FillPortion(left.max(1))))
        .push(dot)
        .push(Space::new().width(Length::FillPortion((scale - left).max(1))));

    Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(Space::new().height(Length::FillPortion(top.max(1))))
        .push(line)
        .push(Space::new().height(Length::FillPortion((scale - top).max(1))))
        .into()
}

fn content_box<'a, Message: Clone + 'a>(
    overlay: &'a Overlay,
    colors: ThemeColors,
    on_open: Message,
) -> Element<'a, Message> {
    let title = text(overlay.title())
        .size(typography::DISPLAY)
        .color(colors.text);
    let subtitle = text(overlay.subtitle())
        .size(typography::TITLE_MD)
        .color(with_alpha(colors.text, opacity::OVERLAY_STRONG + 0.2));

    let open_button = button(text(overlay.button_text()).size(typography::BODY_LG))
        .on_press(on_open)
        .padding([spacing::SM, spacing::XL])
        .style(move |theme: &Theme, status: button::Status| {
            let base = button::primary(theme, status);
            let background = match status {
                button::Status::Hovered | button::Status::Pressed => colors.text,
                _ => colors.accent,
            };
            button::Style {
                background: Some(Background::Color(background)),
                text_color: colors.panel_edge,
                border: Border {
                    radius: radius::FULL.into(),
                    ..Default::default()
                },
                shadow: shadow::LG,
                ..base
            }
        });

    let content = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fixed(sizing::CONTENT_WIDTH))
        .push(title)
        .push(subtitle)
        .push(Space::new().height(Length::Fixed(spacing::LG)))
        .push(open_button);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}
