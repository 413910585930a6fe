//! Engine module: probing, classification and the CLI surface

pub mod arg_parser;
pub mod classify;
pub mod cli;
pub mod probe;
pub mod progress;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use classify::{Classification, is_excluded_not_found, is_success};
pub use cli::{handle_run, open_sinks, setup_opts};
pub use probe::{HttpProber, Probe, describe_error, responded, version_str};
