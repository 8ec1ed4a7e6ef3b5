//! Hardware wallet connection dialog.

use std::time::Duration;

use iced::{alignment::Vertical, widget::Space, Length, Subscription, Task};
use tracing::debug;

use hwlink::{
    orchestrator::TransportLayer, ConnectionState, Orchestrator, Outcome, VendorId, WALLET_OPTIONS,
};
use hwlink_ui::{
    component::{button, hw, notification, spinner::Spinner, text},
    image, theme,
    widget::*,
};

const SPINNER_SIZE: f32 = 24.0;
const SPINNER_TICK: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub enum Message {
    Select(VendorId),
    AttemptFinished(Outcome),
    Tick,
    Initialized,
    /// Request to close the dialog, handled by the parent.
    Close,
    Disposed,
}

/// The dialog owns its connection state, a fresh one is created each time it is mounted.
#[derive(Debug)]
pub struct HardwareWalletModal {
    state: ConnectionState,
    spinner: Spinner,
    orchestrator: Orchestrator,
    layer: TransportLayer,
}

impl HardwareWalletModal {
    /// Creates the dialog and initializes the transport layer of every vendor.
    pub fn mount(orchestrator: Orchestrator) -> (Self, Task<Message>) {
        let layer = orchestrator.mount();
        let init = layer.initialize_transport_layer();
        (
            Self {
                state: ConnectionState::new(),
                spinner: Spinner::default(),
                orchestrator,
                layer,
            },
            Task::perform(init, |_| Message::Initialized),
        )
    }

    /// Disposes the transport layer of every vendor. Consumes the dialog so it happens once.
    pub fn unmount(self) -> Task<Message> {
        Task::perform(self.layer.teardown_transport_layer(), |_| Message::Disposed)
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn is_dismissible(&self) -> bool {
        self.state.is_dismissible()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Select(vendor) => {
                if let Some((state, attempt)) = self.orchestrator.select(&self.state, vendor) {
                    self.state = state;
                    self.spinner = Spinner::default();
                    return Task::perform(attempt.run(), Message::AttemptFinished);
                }
            }
            Message::AttemptFinished(outcome) => {
                self.state = self.state.resolve(&outcome);
                if outcome.is_connected() {
                    return Task::done(Message::Close);
                }
            }
            Message::Tick => {
                if self.state.connecting {
                    self.spinner = self.spinner.advance();
                }
            }
            Message::Initialized => debug!("Transport layer initialized"),
            Message::Close | Message::Disposed => {}
        }
        Task::none()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.state.connecting {
            iced::time::every(SPINNER_TICK).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    pub fn view(&self) -> Element<Message> {
        let dismissible = self.is_dismissible();
        let header = Row::new()
            .align_y(Vertical::Center)
            .push(text::h3("Connect Hardware Wallet"))
            .push(Space::with_width(Length::Fill))
            .push(
                button::transparent("Close").on_press_maybe(dismissible.then_some(Message::Close)),
            );

        let options = WALLET_OPTIONS
            .iter()
            .fold(Column::new().spacing(10), |col, option| {
                let selected = self.state.is_selected(option.id);
                let spinner = (self.state.connecting && selected)
                    .then(|| self.spinner.view(SPINNER_SIZE));
                col.push(
                    Button::new(hw::wallet_option(
                        option.name,
                        image::wallet_logo(option.icon),
                        self.state.connecting,
                        selected,
                        spinner,
                    ))
                    .padding(0)
                    .width(Length::Fill)
                    .style(theme::button::wallet_option)
                    .on_press_maybe(
                        (!self.state.connecting).then_some(Message::Select(option.id)),
                    ),
                )
            });

        Container::new(
            Column::new()
                .spacing(20)
                .push(header)
                .push_maybe(
                    self.state
                        .error
                        .as_deref()
                        .map(|e| notification::error(e)),
                )
                .push(options),
        )
        .padding(25)
        .width(Length::Fixed(480.0))
        .style(theme::card::modal)
        .into()
    }
}
