use iced::{alignment::Vertical, widget::Space, Length};

use hwlink::Account;
use hwlink_ui::{
    component::{button, text},
    image, theme,
    widget::*,
};

use super::Message;
use crate::config::NavLink;

const CURVE_WIDTH: f32 = 60.0;

/// Navigation bar: the links, the current one highlighted, followed by the connect trigger.
pub fn navigation<'a>(
    links: &'a [NavLink],
    current: &'a str,
    account: Option<&'a Account>,
) -> Element<'a, Message> {
    let links = links.iter().fold(
        Row::new().spacing(10).align_y(Vertical::Top),
        |row, link| {
            if link.path == current {
                row.push(
                    Column::new()
                        .spacing(2)
                        .push(button::menu_active(&link.label))
                        .push(image::headline_curve().width(Length::Fixed(CURVE_WIDTH))),
                )
            } else {
                row.push(
                    button::menu(&link.label).on_press(Message::Navigate(link.path.clone())),
                )
            }
        },
    );

    Container::new(
        Row::new()
            .spacing(20)
            .align_y(Vertical::Center)
            .push(text::h4_bold("HwLink"))
            .push(links)
            .push(Space::with_width(Length::Fill))
            .push_maybe(account.map(|account| {
                text::caption(format!("{} {}", account.vendor.name(), account.address))
                    .style(theme::text::secondary)
            }))
            .push(button::primary("Connect Hardware Wallet").on_press(Message::OpenModal)),
    )
    .padding([10, 20])
    .width(Length::Fill)
    .style(theme::card::navigation)
    .into()
}
