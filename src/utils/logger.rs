use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Initialize logging for the CLI. Dependencies stay at warn; this crate runs
/// at info, or debug with `--verbose`. `RUST_LOG` still overrides everything.
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), level)
        .format(|buf, record| {
            let tag = env!("CARGO_PKG_NAME").cyan();
            let line = match record.level() {
                Level::Warn => format!("[{} {}] {}", tag, "WARN".yellow(), record.args()),
                Level::Error => format!("[{} {}] {}", tag, "ERROR".red(), record.args()),
                _ => format!("[{}] {}", tag, record.args()),
            };
            writeln!(buf, "{}", line)
        })
        .init();
}
