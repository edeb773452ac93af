use std::{fs::File, io::Write};

use env_logger::{Builder, Target, WriteStyle, fmt::Formatter};
use log::Level;

use crate::{
    Error, Result,
    options::{LogFormat, SolverOptions},
};

/// Installs the global logger described by `options`.
///
/// Fails if the log file cannot be created or a logger is already set.
pub fn init_logger(options: &SolverOptions) -> Result<()> {
    let log_format = options.log_format;
    let log_timestamp = options.log_timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .format(move |buf: &mut Formatter, record| {
            if log_timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            writeln!(
                buf,
                "{} {}",
                line_prefix(log_format, record.level(), record.target()),
                record.args()
            )
        });

    match options.log_output_path() {
        Some(log_path) => {
            let log_file = File::create(log_path).map_err(|source| Error::FileOpen {
                path: log_path.to_path_buf(),
                source,
            })?;
            builder.target(Target::Pipe(Box::new(log_file)));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn line_prefix(format: LogFormat, level: Level, target: &str) -> String {
    match format {
        LogFormat::Compact => level_tag(level).to_string(),
        LogFormat::Pretty => format!("{:<5} [{}]", level_tag(level), short_target(target)),
    }
}

/// `tsp_core::algo::held_karp` -> `algo::held_karp`.
fn short_target(target: &str) -> &str {
    target
        .split_once("::")
        .map_or(target, |(_, rest)| rest)
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
