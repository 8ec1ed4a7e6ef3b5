use iced::widget::button::{Catalog, Status, Style, StyleFn};
use iced::{Background, Border, Color};

use super::palette::{Button, ButtonPalette};
use super::Theme;

impl Catalog for Theme {
    type Class<'a> = StyleFn<'a, Self>;

    fn default<'a>() -> Self::Class<'a> {
        Box::new(primary)
    }

    fn style(&self, class: &Self::Class<'_>, status: Status) -> Style {
        class(self, status)
    }
}

pub fn primary(theme: &Theme, status: Status) -> Style {
    button(&theme.colors.buttons.primary, status, 25.0)
}

pub fn transparent(theme: &Theme, status: Status) -> Style {
    button(&theme.colors.buttons.transparent, status, 25.0)
}

pub fn wallet_option(theme: &Theme, status: Status) -> Style {
    button(&theme.colors.buttons.wallet_option, status, 12.0)
}

pub fn menu(theme: &Theme, status: Status) -> Style {
    button(&theme.colors.buttons.menu, status, 0.0)
}

pub fn menu_pressed(theme: &Theme, _status: Status) -> Style {
    button(&theme.colors.buttons.menu, Status::Pressed, 0.0)
}

fn style(p: &ButtonPalette, radius: f32) -> Style {
    Style {
        background: Some(Background::Color(p.background)),
        text_color: p.text,
        border: if let Some(color) = p.border {
            Border {
                radius: radius.into(),
                width: 1.0,
                color,
            }
        } else {
            Border {
                ..Default::default()
            }
        },
        ..Default::default()
    }
}

fn button(p: &Button, status: Status, radius: f32) -> Style {
    match status {
        Status::Active => style(&p.active, radius),
        Status::Hovered => style(&p.hovered, radius),
        Status::Pressed => {
            if let Some(pressed) = p.pressed {
                style(&pressed, radius)
            } else {
                button(p, Status::Active, radius)
            }
        }
        Status::Disabled => {
            if let Some(disabled) = p.disabled {
                style(&disabled, radius)
            } else {
                let active: Style = button(p, Status::Active, radius);

                Style {
                    text_color: Color {
                        a: 0.2,
                        ..active.text_color
                    },
                    ..active
                }
            }
        }
    }
}
