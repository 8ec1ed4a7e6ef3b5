use super::text::text;
use crate::font::MEDIUM;
use crate::{theme, widget::*};
use iced::widget::container;

pub fn menu<'a, T: 'a>(t: &'a str) -> Button<'a, T> {
    Button::new(container(text(t)).padding(5)).style(theme::button::menu)
}

pub fn menu_active<'a, T: 'a>(t: &'a str) -> Button<'a, T> {
    Button::new(container(text(t).font(MEDIUM)).padding(5)).style(theme::button::menu_pressed)
}

pub fn primary<'a, T: 'a>(t: &'static str) -> Button<'a, T> {
    Button::new(
        container(
            text(t)
                .font(MEDIUM)
                .align_y(iced::Alignment::Center)
                .align_x(iced::Alignment::Center),
        )
        .padding([5, 15]),
    )
    .style(theme::button::primary)
}

pub fn transparent<'a, T: 'a>(t: &'static str) -> Button<'a, T> {
    Button::new(
        container(
            text(t)
                .align_y(iced::Alignment::Center)
                .align_x(iced::Alignment::Center),
        )
        .padding(5),
    )
    .style(theme::button::transparent)
}
