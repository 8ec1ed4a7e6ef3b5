use iced::widget::svg::{Catalog, Status, Style, StyleFn};

use super::Theme;

impl Catalog for Theme {
    type Class<'a> = StyleFn<'a, Self>;

    fn default<'a>() -> Self::Class<'a> {
        Box::new(|_theme, _status| Style::default())
    }

    fn style(&self, class: &Self::Class<'_>, status: Status) -> Style {
        class(self, status)
    }
}

/// Logo of the wallet currently connecting.
pub fn greyed(theme: &Theme, _status: Status) -> Style {
    Style {
        color: Some(theme.colors.logos.greyed),
    }
}
