#![windows_subsystem = "windows"]

use std::{error::Error, io::Write};

#[cfg(target_os = "linux")]
use iced::window::settings::PlatformSpecific;
use iced::{Settings, Size};
use tracing::{error, info};

use hwlink_ui::{component::text, font, theme};

use hwlink_gui::{
    app::App,
    args::{parse_args, resolve_paths},
    config::Config,
    logger::{parse_log_level, setup_logger},
    VERSION,
};

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args(std::env::args().collect(), VERSION)?;
    let (datadir, config_path) = resolve_paths(&args)?;

    if !datadir.exists() {
        datadir.init()?;
    }

    let config = Config::from_file(&config_path)?;
    let log_level = match parse_log_level()? {
        Some(level) => level,
        None => config.log_level()?,
    };
    setup_logger(log_level, &datadir)?;
    setup_panic_hook();
    info!("hwlink-gui {} started", VERSION);

    let settings = Settings {
        id: Some("HwLink".to_string()),
        antialiasing: true,

        default_text_size: text::P1_SIZE.into(),
        default_font: font::REGULAR,
        fonts: Vec::new(),
    };

    #[allow(unused_mut)]
    let mut window_settings = iced::window::Settings {
        size: Size {
            width: 1000.0,
            height: 700.0,
        },
        position: iced::window::Position::Default,
        min_size: Some(Size {
            width: 640.0,
            height: 480.0,
        }),
        ..Default::default()
    };

    #[cfg(target_os = "linux")]
    {
        window_settings.platform_specific = PlatformSpecific {
            application_id: "HwLink".to_string(),
            ..Default::default()
        };
    }

    if let Err(e) = iced::application(App::title, App::update, App::view)
        .theme(|_| theme::Theme::default())
        .subscription(App::subscription)
        .settings(settings)
        .window(window_settings)
        .run_with(move || App::new(config))
    {
        error!("{}", e);
        Err(format!("Failed to launch UI: {}", e).into())
    } else {
        Ok(())
    }
}

// A panic in any thread should stop the main thread, and print the panic.
fn setup_panic_hook() {
    std::panic::set_hook(Box::new(move |panic_info| {
        let file = panic_info
            .location()
            .map(|l| l.file())
            .unwrap_or_else(|| "'unknown'");
        let line = panic_info
            .location()
            .map(|l| l.line().to_string())
            .unwrap_or_else(|| "'unknown'".to_string());

        let bt = backtrace::Backtrace::new();
        let info = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned());
        error!(
            "panic occurred at line {} of file {}: {:?}\n{:?}",
            line, file, info, bt
        );

        let _ = std::io::stdout().flush();
        std::process::exit(1);
    }));
}
