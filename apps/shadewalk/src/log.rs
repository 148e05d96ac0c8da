//! Logger setup shared by the three pipeline binaries.
//!
//! Messages below `warn` go to stdout, warnings and errors to stderr, each
//! coloured only when attached to a terminal.  When a log file is given,
//! every message at the active level is also appended to it without colour,
//! so consecutive stages of one run share a single `shadewalk.log`.

use std::env;
use std::fmt::{Arguments, Display};
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result, bail};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record};

/// Environment variable overriding the configured level.
pub const LOG_LEVEL_ENV: &str = "SHADEWALK_LOG_LEVEL";

const DEFAULT_LOG_LEVEL: &str = "info";

static LOGGER_INIT: OnceLock<()> = OnceLock::new();

pub fn is_logger_initialised() -> bool {
    LOGGER_INIT.get().is_some()
}

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
pub fn parse_level(name: &str) -> Result<LevelFilter> {
    Ok(match name.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("unknown log level: {unknown}"),
    })
}

/// The level to use: environment, then config, then `info`.
pub fn resolve_level(from_env: Option<&str>, from_config: Option<&str>) -> Result<LevelFilter> {
    parse_level(from_env.or(from_config).unwrap_or(DEFAULT_LOG_LEVEL))
}

/// Install the global logger.  A second call is a no-op.
pub fn init(level_from_config: Option<&str>, log_file: Option<&Path>) -> Result<()> {
    if is_logger_initialised() {
        return Ok(());
    }

    let from_env = env::var(LOG_LEVEL_ENV).ok();
    let level = resolve_level(from_env.as_deref(), level_from_config)?;

    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);
    let colour_stdout = std::io::stdout().is_terminal();
    let colour_stderr = std::io::stderr().is_terminal();

    let mut dispatch = Dispatch::new()
        .chain(
            Dispatch::new()
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, colour_stdout, &colours);
                })
                .level(level)
                .chain(std::io::stdout()),
        )
        .chain(
            Dispatch::new()
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, colour_stderr, &colours);
                })
                .level(level.min(LevelFilter::Warn))
                .chain(std::io::stderr()),
        );

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        dispatch = dispatch.chain(Dispatch::new().format(write_log_plain).level(level).chain(file));
    }

    dispatch.apply().context("a logger is already installed")?;
    let _ = LOGGER_INIT.set(());
    Ok(())
}

fn write_log<T: Display>(out: FormatCallback, level: T, target: &str, message: &Arguments) {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
}

fn write_log_plain(out: FormatCallback, message: &Arguments, record: &Record) {
    write_log(out, record.level(), record.target(), message);
}

fn write_log_colour(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    use_colour: bool,
    colours: &ColoredLevelConfig,
) {
    if use_colour {
        write_log(out, colours.color(record.level()), record.target(), message);
    } else {
        write_log_plain(out, message, record);
    }
}
