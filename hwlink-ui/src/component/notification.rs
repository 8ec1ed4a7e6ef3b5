use crate::{component::text, theme, widget::*};
use iced::Length;

/// Banner displaying an error message.
pub fn error<'a, T: 'a>(message: &'a str) -> Container<'a, T> {
    Container::new(text::p2_regular(message).style(theme::text::error))
        .padding(15)
        .style(theme::banner::error)
        .width(Length::Fill)
}
