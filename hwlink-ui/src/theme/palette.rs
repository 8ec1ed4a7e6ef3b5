use crate::color;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    pub general: General,
    pub text: Text,
    pub buttons: Buttons,
    pub cards: Cards,
    pub banners: Banners,
    pub logos: Logos,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Text {
    pub primary: iced::Color,
    pub secondary: iced::Color,
    pub error: iced::Color,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct General {
    pub background: iced::Color,
    pub backdrop: iced::Color,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Buttons {
    pub primary: Button,
    pub transparent: Button,
    pub wallet_option: Button,
    pub menu: Button,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Button {
    pub active: ButtonPalette,
    pub hovered: ButtonPalette,
    pub pressed: Option<ButtonPalette>,
    pub disabled: Option<ButtonPalette>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ButtonPalette {
    pub background: iced::Color,
    pub text: iced::Color,
    pub border: Option<iced::Color>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ContainerPalette {
    pub background: iced::Color,
    pub text: Option<iced::Color>,
    pub border: Option<iced::Color>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cards {
    pub modal: ContainerPalette,
    pub navigation: ContainerPalette,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Banners {
    pub error: ContainerPalette,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Logos {
    /// Tint of the selected logo while connecting.
    pub greyed: iced::Color,
}

impl std::default::Default for Palette {
    fn default() -> Self {
        Self {
            general: General {
                background: color::LIGHT_BLACK,
                backdrop: color::BACKDROP,
            },
            text: Text {
                primary: color::WHITE,
                secondary: color::GREY_2,
                error: color::RED,
            },
            buttons: Buttons {
                primary: Button {
                    active: ButtonPalette {
                        background: color::CYAN,
                        text: color::BLACK,
                        border: color::CYAN.into(),
                    },
                    hovered: ButtonPalette {
                        background: color::CYAN_DARK,
                        text: color::BLACK,
                        border: color::CYAN_DARK.into(),
                    },
                    pressed: Some(ButtonPalette {
                        background: color::CYAN_DARK,
                        text: color::BLACK,
                        border: color::CYAN_DARK.into(),
                    }),
                    disabled: Some(ButtonPalette {
                        background: color::GREY_4,
                        text: color::GREY_2,
                        border: color::GREY_4.into(),
                    }),
                },
                transparent: Button {
                    active: ButtonPalette {
                        background: color::TRANSPARENT,
                        text: color::WHITE,
                        border: None,
                    },
                    hovered: ButtonPalette {
                        background: color::TRANSPARENT,
                        text: color::CYAN,
                        border: None,
                    },
                    pressed: None,
                    disabled: Some(ButtonPalette {
                        background: color::TRANSPARENT,
                        text: color::GREY_3,
                        border: None,
                    }),
                },
                wallet_option: Button {
                    active: ButtonPalette {
                        background: color::GREY_5,
                        text: color::WHITE,
                        border: color::GREY_4.into(),
                    },
                    hovered: ButtonPalette {
                        background: color::GREY_5,
                        text: color::WHITE,
                        border: color::CYAN.into(),
                    },
                    pressed: Some(ButtonPalette {
                        background: color::TRANSPARENT_CYAN,
                        text: color::WHITE,
                        border: color::CYAN.into(),
                    }),
                    disabled: Some(ButtonPalette {
                        background: color::GREY_6,
                        text: color::GREY_3,
                        border: color::GREY_5.into(),
                    }),
                },
                menu: Button {
                    active: ButtonPalette {
                        background: color::TRANSPARENT,
                        text: color::GREY_2,
                        border: None,
                    },
                    hovered: ButtonPalette {
                        background: color::TRANSPARENT,
                        text: color::WHITE,
                        border: None,
                    },
                    pressed: Some(ButtonPalette {
                        background: color::TRANSPARENT,
                        text: color::WHITE,
                        border: None,
                    }),
                    disabled: None,
                },
            },
            cards: Cards {
                modal: ContainerPalette {
                    background: color::LIGHT_BLACK,
                    text: None,
                    border: color::GREY_4.into(),
                },
                navigation: ContainerPalette {
                    background: color::GREY_6,
                    text: None,
                    border: None,
                },
            },
            banners: Banners {
                error: ContainerPalette {
                    background: color::TRANSPARENT_RED,
                    text: color::RED.into(),
                    border: color::RED.into(),
                },
            },
            logos: Logos {
                greyed: color::GREY_3,
            },
        }
    }
}
