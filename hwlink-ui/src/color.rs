use iced::Color;
pub const BLACK: Color = iced::Color::BLACK;
pub const TRANSPARENT: Color = iced::Color::TRANSPARENT;
pub const LIGHT_BLACK: Color = Color::from_rgb(
    0x14 as f32 / 255.0,
    0x14 as f32 / 255.0,
    0x14 as f32 / 255.0,
);
pub const GREY_6: Color = Color::from_rgb(
    0x20 as f32 / 255.0,
    0x20 as f32 / 255.0,
    0x20 as f32 / 255.0,
);
pub const GREY_5: Color = Color::from_rgb(
    0x27 as f32 / 255.0,
    0x27 as f32 / 255.0,
    0x27 as f32 / 255.0,
);
pub const GREY_4: Color = Color::from_rgb(
    0x42 as f32 / 255.0,
    0x42 as f32 / 255.0,
    0x42 as f32 / 255.0,
);
pub const GREY_3: Color = Color::from_rgb(
    0x71 as f32 / 255.0,
    0x71 as f32 / 255.0,
    0x71 as f32 / 255.0,
);
pub const GREY_2: Color = Color::from_rgb(
    0xCC as f32 / 255.0,
    0xCC as f32 / 255.0,
    0xCC as f32 / 255.0,
);
pub const WHITE: Color = iced::Color::WHITE;
pub const RED: Color = Color::from_rgb(
    0xE2 as f32 / 255.0,
    0x4E as f32 / 255.0,
    0x1B as f32 / 255.0,
);
pub const TRANSPARENT_RED: Color = Color::from_rgba(
    0xE2 as f32 / 255.0,
    0x4E as f32 / 255.0,
    0x1B as f32 / 255.0,
    0.15,
);

// Navigation trigger accent.
pub const CYAN: Color = Color::from_rgb(
    0x00 as f32 / 255.0,
    0xDB as f32 / 255.0,
    0xE3 as f32 / 255.0,
); // #00DBE3

pub const CYAN_DARK: Color = Color::from_rgb(
    0x00 as f32 / 255.0,
    0xC4 as f32 / 255.0,
    0xCC as f32 / 255.0,
); // #00C4CC

pub const TRANSPARENT_CYAN: Color = Color::from_rgba(
    0x00 as f32 / 255.0,
    0xDB as f32 / 255.0,
    0xE3 as f32 / 255.0,
    0.15,
);

// Modal backdrop.
pub const BACKDROP: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.8);
