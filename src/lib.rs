//! Pathprobe: dictionary-driven forced browsing against a single HTTP host

pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::debug;
use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::engine::probe::HttpProber;
use crate::pipeline::{CancelToken, ScanReport, Sinks};

/// Result alias used by public pathprobe API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: probe `target` for every path read from `dictionary` and write the three
/// result streams to `sinks`.
///
/// `dictionary` is any line source (a `BufReader<File>`, a `Cursor` over an in-memory list...).
/// Blank lines are skipped; every other line is trimmed and probed verbatim.
/// Call [`CancelToken::cancel`] from any thread (e.g. a signal handler) to stop admitting paths;
/// the call still returns normally once in-flight work has drained, with `summary.cancelled` set.
///
/// ```ignore
/// let target = ProbeOpts { host: "example.com".into(), ..Default::default() };
/// let sinks = Sinks::new(Vec::new(), Vec::new(), Vec::new());
/// let report = pathprobe::probe_host(dict, &target, sinks, &ScanOpts::default(), &CancelToken::new())?;
/// println!("{} x 200 OK", report.summary.counts.success);
/// ```
pub fn probe_host<R, W>(
    dictionary: R,
    target: &ProbeOpts,
    sinks: Sinks<W>,
    scan: &ScanOpts,
    cancel: &CancelToken,
) -> Result<ScanReport<W>>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    debug!(
        "{} TARGET:{:#?} SCAN:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        target,
        scan
    );
    let prober = HttpProber::new(target)?;
    pipeline::run_scan(dictionary, Arc::new(prober), sinks, scan, cancel, None)
}
