pub mod app;
pub mod args;
pub mod config;
pub mod dir;
pub mod hw;
pub mod logger;
#[cfg(test)]
pub mod utils;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
