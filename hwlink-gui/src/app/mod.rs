pub mod modal;
mod navigation;

use iced::{Length, Subscription, Task};
use tracing::{debug, info, warn};

use hwlink::{Account, Orchestrator, Outcome};
use hwlink_ui::{
    component::text,
    theme,
    widget::{modal::Modal, *},
};

use crate::{
    config::{Config, NavLink},
    hw,
};

use modal::HardwareWalletModal;

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(String),
    OpenModal,
    Modal(modal::Message),
}

pub struct App {
    navigation: Vec<NavLink>,
    current: String,
    orchestrator: Orchestrator,
    modal: Option<HardwareWalletModal>,
    account: Option<Account>,
}

impl App {
    pub fn new(config: Config) -> (App, Task<Message>) {
        let orchestrator = Orchestrator::new(hw::connectors(&config));
        (Self::with_orchestrator(config.navigation, orchestrator), Task::none())
    }

    pub fn with_orchestrator(navigation: Vec<NavLink>, orchestrator: Orchestrator) -> Self {
        let current = navigation
            .first()
            .map(|link| link.path.clone())
            .unwrap_or_else(|| "/".to_string());
        Self {
            navigation,
            current,
            orchestrator,
            modal: None,
            account: None,
        }
    }

    pub fn title(&self) -> String {
        "HwLink".to_string()
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn modal(&self) -> Option<&HardwareWalletModal> {
        self.modal.as_ref()
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(path) => {
                if self.navigation.iter().any(|link| link.path == path) {
                    self.current = path;
                } else {
                    warn!("Unknown navigation path {}", path);
                }
                Task::none()
            }
            Message::OpenModal => {
                if self.modal.is_some() {
                    return Task::none();
                }
                let (modal, task) = HardwareWalletModal::mount(self.orchestrator.clone());
                self.modal = Some(modal);
                task.map(Message::Modal)
            }
            Message::Modal(modal::Message::Close) => {
                if !self.modal.as_ref().is_some_and(|m| m.is_dismissible()) {
                    return Task::none();
                }
                match self.modal.take() {
                    Some(modal) => modal.unmount().map(Message::Modal),
                    None => Task::none(),
                }
            }
            Message::Modal(modal::Message::Disposed) => {
                debug!("Transport layer disposed");
                Task::none()
            }
            Message::Modal(msg) => {
                if let modal::Message::AttemptFinished(Outcome::Connected(account)) = &msg {
                    info!("{} account {} connected", account.vendor.name(), account.address);
                    self.account = Some(account.clone());
                }
                match self.modal.as_mut() {
                    Some(modal) => modal.update(msg).map(Message::Modal),
                    // Late answer of a closed dialog.
                    None => Task::none(),
                }
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        match &self.modal {
            Some(modal) => modal.subscription().map(Message::Modal),
            None => Subscription::none(),
        }
    }

    pub fn view(&self) -> Element<Message> {
        let page = self
            .navigation
            .iter()
            .find(|link| link.path == self.current)
            .map(|link| link.label.as_str())
            .unwrap_or_default();
        let base = Column::new()
            .push(navigation::navigation(
                &self.navigation,
                &self.current,
                self.account.as_ref(),
            ))
            .push(
                Container::new(text::h3(page))
                    .padding(40)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(theme::container::background),
            );

        match &self.modal {
            Some(modal) => Modal::new(base, modal.view().map(Message::Modal))
                .on_blur(
                    modal
                        .is_dismissible()
                        .then_some(Message::Modal(modal::Message::Close)),
                )
                .into(),
            None => base.into(),
        }
    }
}
