//! Command-line argument parsing.

use std::{error::Error, fmt::Display, path::PathBuf, process};

use crate::dir::HwLinkDirectory;

/// Parsed command-line argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    DatadirPath(HwLinkDirectory),
    ConfigPath(PathBuf),
}

/// Parse command-line arguments.
///
/// # Arguments
/// - `args`: Command-line arguments (including program name at args[0])
/// - `version`: Version to display for --version flag
pub fn parse_args(args: Vec<String>, version: impl Display) -> Result<Vec<Arg>, Box<dyn Error>> {
    let mut res = Vec::new();

    let app_name = args
        .first()
        .and_then(|a| std::path::Path::new(a).file_name())
        .and_then(|s| s.to_str())
        .unwrap_or("hwlink-gui");

    if args.len() > 1 && (args[1] == "--version" || args[1] == "-v") {
        eprintln!("{}", version);
        process::exit(0);
    }

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        eprintln!(
            r#"
Usage: {app_name} [OPTIONS]

Options:
    --datadir <PATH>    Path of hwlink datadir
    --config <PATH>     Path of the configuration file (default: <datadir>/hwlink.toml)
    -v, --version       Display {app_name} version
    -h, --help          Print help
        "#
        );
        process::exit(0);
    }

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--datadir" => match iter.next() {
                Some(a) => res.push(Arg::DatadirPath(HwLinkDirectory::new(PathBuf::from(a)))),
                None => return Err("missing arg to --datadir".into()),
            },
            "--config" => match iter.next() {
                Some(a) => res.push(Arg::ConfigPath(PathBuf::from(a))),
                None => return Err("missing arg to --config".into()),
            },
            a => return Err(format!("unknown argument '{}'", a).into()),
        }
    }

    Ok(res)
}

/// Resolves the data directory and the configuration file path from the parsed arguments.
pub fn resolve_paths(args: &[Arg]) -> Result<(HwLinkDirectory, PathBuf), Box<dyn Error>> {
    let mut datadir = None;
    let mut config_path = None;
    for arg in args {
        match arg {
            Arg::DatadirPath(d) if datadir.is_none() => datadir = Some(d.clone()),
            Arg::ConfigPath(p) if config_path.is_none() => config_path = Some(p.clone()),
            _ => return Err("Unknown args combination".into()),
        }
    }
    let datadir = match datadir {
        Some(d) => d,
        None => HwLinkDirectory::new_default()?,
    };
    let config_path = config_path.unwrap_or_else(|| datadir.config_file_path());
    Ok((datadir, config_path))
}
