pub mod color;
pub mod component;
pub mod font;
pub mod image;
pub mod theme;
pub mod widget;
