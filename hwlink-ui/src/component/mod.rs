pub mod button;
pub mod hw;
pub mod notification;
pub mod spinner;
pub mod text;
