//! Application configuration constants.
//! Defaults and queue sizing in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
    user_agent: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Raw log of every probe.
    pub const RAW_LOG: &'static str = ".log.dat";
    /// Lines containing "200 OK".
    pub const SUCCESS_LOG: &'static str = "output-200.txt";
    /// Lines not containing "404 Not Found".
    pub const EX404_LOG: &'static str = "output-ex404.txt";

    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
                user_agent: format!("{pkg}/{}", env!("CARGO_PKG_VERSION")),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

// ---- Run defaults ----

/// Defaults applied when neither the config file nor a flag sets a value.
pub struct ScanDefaults;

impl ScanDefaults {
    pub const PORT: u16 = 80;
    pub const DICT: &'static str = "hybridWebSearch.dic";
    pub const CONCURRENCY: usize = 10;
    /// Per-request timeout (seconds).
    pub const TIMEOUT_SECS: u64 = 5;
}

// ---- Queues ----

/// Capacities of the bounded work and result queues (backpressure).
pub struct QueueConsts;

impl QueueConsts {
    pub const WORK_QUEUE_CAP: usize = 100;
    pub const RESULT_QUEUE_CAP: usize = 100;
}
