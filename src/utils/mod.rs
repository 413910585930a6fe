pub mod config;
pub mod fd_limit;
pub mod logger;
pub mod pathprobe_toml;

pub use config::*;
pub use fd_limit::{FDS_PER_WORKER, cap_concurrency, max_open_fds, workers_for_fd_limit};
pub use logger::{Colors, setup_logging};
pub use pathprobe_toml::{PathprobeToml, apply_file_to_opts, load_pathprobe_toml};
