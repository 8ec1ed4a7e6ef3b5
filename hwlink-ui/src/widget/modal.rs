//! Modal built from the layering widgets of iced: the base is drawn below an opaque backdrop
//! catching every event, the modal content is centered on top.
use iced::widget::{center, mouse_area, opaque, stack};

use crate::theme;

use super::Element;

/// A widget that centers a modal element over some base element
pub struct Modal<'a, Message> {
    base: Element<'a, Message>,
    modal: Element<'a, Message>,
    on_blur: Option<Message>,
}

impl<'a, Message> Modal<'a, Message>
where
    Message: Clone + 'a,
{
    /// Returns a new [`Modal`]
    pub fn new(
        base: impl Into<Element<'a, Message>>,
        modal: impl Into<Element<'a, Message>>,
    ) -> Self {
        Self {
            base: base.into(),
            modal: modal.into(),
            on_blur: None,
        }
    }

    /// Sets the message that will be produced when the background
    /// of the [`Modal`] is pressed. `None` makes the background inert.
    pub fn on_blur(self, on_blur: Option<Message>) -> Self {
        Self { on_blur, ..self }
    }
}

impl<'a, Message> From<Modal<'a, Message>> for Element<'a, Message>
where
    Message: Clone + 'a,
{
    fn from(modal: Modal<'a, Message>) -> Self {
        let backdrop = center(opaque(modal.modal)).style(theme::container::backdrop);
        let mut area = mouse_area(backdrop);
        if let Some(on_blur) = modal.on_blur {
            area = area.on_press(on_blur);
        }
        stack![modal.base, opaque(area)].into()
    }
}
