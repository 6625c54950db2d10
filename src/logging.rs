use clap::ValueEnum;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

#[derive(ValueEnum, Debug, Copy, Clone, Eq, PartialEq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// Log lines go to stderr; stdout is reserved for workflow commands and results.
pub fn init(level: LogLevel) -> anyhow::Result<()> {
    let colors = atty::is(atty::Stream::Stderr).then(|| {
        ColoredLevelConfig::new()
            .error(Color::Red)
            .warn(Color::Yellow)
            .info(Color::Green)
            .debug(Color::Cyan)
            .trace(Color::BrightBlack)
    });

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let timestamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f");
            match &colors {
                Some(colors) => out.finish(format_args!(
                    "[{timestamp}][{}][{}] {message}",
                    colors.color(record.level()),
                    record.target(),
                )),
                None => out.finish(format_args!(
                    "[{timestamp}][{}][{}] {message}",
                    record.level(),
                    record.target(),
                )),
            }
        })
        .level(level.into())
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
