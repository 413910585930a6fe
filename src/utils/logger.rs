use colored::{ColoredString, Colorize};
use env_logger::Builder;
use log::Level;
use std::io::Write;

/// Initialize env_logger with the colored formatter. `RUST_LOG` still overrides dependencies.
/// A second call is a no-op.
pub fn setup_logging(verbose: bool) {
    use log::LevelFilter;

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn) // Default: only warnings from dependencies
        .filter_module(env!("CARGO_PKG_NAME"), level) // Our crate: use requested level
        .format(|buf, record| {
            let name = env!("CARGO_PKG_NAME");
            let line = match record.level() {
                Level::Error | Level::Warn => {
                    let level_str = match record.level() {
                        Level::Warn => "WARN".yellow(),
                        Level::Error => "ERROR".red(),
                        _ => unreachable!(),
                    };
                    let path = record.target().to_string().white();
                    format!("[{} {} {}] {}", name.cyan(), level_str, path, record.args())
                }
                Level::Debug | Level::Trace => format!(
                    "[{} {}] {}",
                    name.cyan(),
                    record.target().dimmed(),
                    record.args().to_string().dimmed()
                ),
                Level::Info => format!("[{}] {}", name.cyan(), record.args()),
            };
            writeln!(buf, "{}", line)
        })
        .try_init();
}

/// Colors for the end-of-run summary.
pub struct Colors;

impl Colors {
    pub const SUCCESS: &'static str = "green";
    pub const EX404: &'static str = "yellow";
    pub const ERROR: &'static str = "red";

    pub fn colorize(color: &str, text: &str) -> ColoredString {
        match color {
            Self::SUCCESS => text.green(),
            Self::EX404 => text.yellow(),
            Self::ERROR => text.red(),
            _ => text.normal(),
        }
    }
}
