use crate::{component::text, theme, widget::*};
use iced::{
    alignment::Vertical,
    widget::{container, Space},
    Length,
};

const LOGO_SIZE: f32 = 40.0;

/// Row of the wallet selection list.
///
/// `busy` is set while any connection attempt runs, `selected` marks the wallet being
/// connected to.
pub fn wallet_option<'a, T: 'a>(
    name: &'a str,
    logo: Option<Svg<'a>>,
    busy: bool,
    selected: bool,
    spinner: Option<Element<'a, T>>,
) -> Container<'a, T> {
    let logo = logo.map(|logo| {
        let logo = logo.width(LOGO_SIZE).height(LOGO_SIZE);
        if busy && selected {
            logo.style(theme::svg::greyed)
        } else if busy {
            logo.opacity(0.5)
        } else {
            logo
        }
    });
    let status = if busy && selected {
        "Connecting..."
    } else {
        "Click to connect"
    };
    container(
        Row::new()
            .spacing(15)
            .align_y(Vertical::Center)
            .push_maybe(logo)
            .push(
                Column::new()
                    .spacing(2)
                    .push(text::p1_bold(name))
                    .push(text::caption(status).style(theme::text::secondary)),
            )
            .push(Space::with_width(Length::Fill))
            .push_maybe(spinner),
    )
    .padding(15)
    .width(Length::Fill)
}
