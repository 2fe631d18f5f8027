use anyhow::Result;
use flexi_logger::{style, DeferredNow, LoggerHandle};
use log::Record;

use std::io::Write;

/// Writes the first letter of the level followed by the message, both coloured
pub fn log_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let level = record.level();
    write!(
        w,
        "{} {}",
        style(level).paint(level.to_string()[..1].to_string()),
        style(level).paint(record.args().to_string())
    )
}

/// Starts logging to stderr with a spec such as `info` or `connect4_alphabeta=debug`
///
/// The returned handle must be kept alive for as long as logging is needed.
pub fn init_logger(spec: &str) -> Result<LoggerHandle> {
    let handle = flexi_logger::Logger::try_with_str(spec)?
        .format_for_stderr(log_format)
        .start()?;
    Ok(handle)
}
