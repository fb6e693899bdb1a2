// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The demo page sits underneath; the curtain is stacked on top of it. While
//! the controller holds the scroll lock the page is rendered without its
//! scrollable wrapper.

use super::Message;
use crate::curtain::{self, Controller};
use crate::ui::design_tokens::{palette, spacing, typography};
use iced::widget::{scrollable, text, Column, Container, Stack};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub controller: &'a Controller,
    pub status: &'a str,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let page = page(ctx.status, ctx.controller.is_scroll_locked());

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(page)
        .push(curtain::view::view(ctx.controller, Message::OpenPressed))
        .into()
}

fn page(status: &str, scroll_locked: bool) -> Element<'_, Message> {
    let mut content = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::XL)
        .width(Length::Fill)
        .push(text("Iced Curtain").size(typography::TITLE_MD))
        .push(text(status).size(typography::BODY).color(palette::GRAY_700));

    for paragraph in PAGE_TEXT {
        content = content.push(text(*paragraph).size(typography::BODY));
    }

    let body: Element<'_, Message> = if scroll_locked {
        content.into()
    } else {
        scrollable(content).height(Length::Fill).into()
    };

    Container::new(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

const PAGE_TEXT: &[&str] = &[
    "The page behind the curtain. It stays still while the curtain is closed \
     and becomes scrollable once the curtain is gone.",
    "Open the curtain with the button, Space, Enter or Escape. With \
     `data-curtain-auto=true` it opens on its own after the configured delay.",
    "Settings come from marker attributes (--attr data-curtain-title=...), \
     then curtain.toml, then the built-in defaults.",
];
