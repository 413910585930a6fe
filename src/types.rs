//! Public and internal types for the pathprobe API and pipeline.

use anyhow::anyhow;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::utils::config::{PackagePaths, QueueConsts, ScanDefaults};

/// HTTP method used for every probe in a run. Resolved once at configuration time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Headers only (default).
    #[default]
    Head,
    /// Full request; the body is discarded unread.
    Get,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Head => "HEAD",
            Method::Get => "GET",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = anyhow::Error;

    /// Case-insensitive: `head`, `HEAD`, `get`, `Get`...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HEAD" => Ok(Method::Head),
            "GET" => Ok(Method::Get),
            other => Err(anyhow!("unsupported HTTP method {other:?} (expected HEAD or GET)")),
        }
    }
}

/// Outcome of a single probe. Exactly one per dispatched path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Server completed a response (any status code).
    Responded {
        /// `HTTP/<major>.<minor>`.
        version: String,
        status: u16,
        /// Canonical reason phrase for `status`; empty when the code has none.
        status_text: String,
    },
    /// Transport-level failure (timeout, refused connection, DNS...).
    Failed { description: String },
}

/// One line of scan output: the probed path and its rendered status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRecord {
    pub path: String,
    pub line: String,
}

impl ResultRecord {
    /// Marker placed between the path and the description of a transport failure.
    pub const ERROR_MARKER: &'static str = "---ERROR:";

    /// Render `outcome` for `path`:
    /// `<path>\t<version> <status> <text>` or `<path>\t---ERROR: <description>`.
    pub fn new(path: String, outcome: &ProbeOutcome) -> Self {
        let line = match outcome {
            ProbeOutcome::Responded {
                version,
                status,
                status_text,
            } => format!("{path}\t{version} {status} {status_text}"),
            ProbeOutcome::Failed { description } => {
                format!("{path}\t{} {}", Self::ERROR_MARKER, single_line(description))
            }
        };
        Self { path, line }
    }

    pub fn is_error(&self) -> bool {
        self.line
            .strip_prefix(self.path.as_str())
            .and_then(|rest| rest.strip_prefix('\t'))
            .is_some_and(|rest| rest.starts_with(Self::ERROR_MARKER))
    }
}

/// Keep sink output line-atomic: error chains occasionally carry newlines.
fn single_line(s: &str) -> String {
    s.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Per-sink line counts accumulated by the collector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanCounts {
    /// Lines written to the raw log (one per recorded probe).
    pub raw: usize,
    /// Lines written to the 200 OK sink.
    pub success: usize,
    /// Lines written to the non-404 sink.
    pub ex404: usize,
    /// Raw lines that carry a transport failure.
    pub errors: usize,
}

/// What a finished (or interrupted) run reports back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Paths the dictionary source admitted into the work queue.
    pub admitted: usize,
    pub counts: ScanCounts,
    /// True when the run ended because cancellation was requested.
    pub cancelled: bool,
}

/// Request configuration shared read-only by every worker.
#[derive(Clone, Debug)]
pub struct ProbeOpts {
    /// Target hostname or IP address.
    pub host: String,
    pub port: u16,
    /// Use `https://` instead of `http://`.
    pub https: bool,
    pub method: Method,
    /// Per-request timeout, fixed for the run.
    pub timeout: Duration,
    /// `User-Agent` header sent with every probe.
    pub user_agent: String,
    /// Honor `HTTP_PROXY` / `HTTPS_PROXY` / `NO_PROXY` from the environment.
    pub use_env_proxy: bool,
}

impl Default for ProbeOpts {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: ScanDefaults::PORT,
            https: false,
            method: Method::default(),
            timeout: Duration::from_secs(ScanDefaults::TIMEOUT_SECS),
            user_agent: PackagePaths::get().user_agent().to_string(),
            use_env_proxy: true,
        }
    }
}

impl ProbeOpts {
    /// `scheme://host:port` without a trailing slash. Bare IPv6 literals get brackets.
    pub fn base_url(&self) -> String {
        let scheme = if self.https { "https" } else { "http" };
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        format!("{scheme}://{host}:{}", self.port)
    }

    /// Request target for `path`. The path is appended verbatim (no escaping).
    pub fn target_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path)
    }
}

/// Pipeline sizing: worker count and queue capacities.
#[derive(Clone, Copy, Debug)]
pub struct ScanOpts {
    /// Number of parallel workers. Must be >= 1.
    pub concurrency: usize,
    pub work_queue_cap: usize,
    pub result_queue_cap: usize,
}

impl Default for ScanOpts {
    fn default() -> Self {
        Self {
            concurrency: ScanDefaults::CONCURRENCY,
            work_queue_cap: QueueConsts::WORK_QUEUE_CAP,
            result_queue_cap: QueueConsts::RESULT_QUEUE_CAP,
        }
    }
}

/// Full options (CLI). Use [`ProbeOpts`] + [`ScanOpts`] for lib.
#[derive(Clone, Debug)]
pub struct Opts {
    pub target: ProbeOpts,
    pub scan: ScanOpts,
    /// Dictionary (wordlist) file.
    pub dict_path: PathBuf,
    /// Directory the three output files are created in.
    pub out_dir: PathBuf,
    /// Debug logging and a progress counter.
    pub verbose: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            target: ProbeOpts::default(),
            scan: ScanOpts::default(),
            dict_path: PathBuf::from(ScanDefaults::DICT),
            out_dir: PathBuf::from("."),
            verbose: false,
        }
    }
}
