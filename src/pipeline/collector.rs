//! Collector: single consumer of the result queue, sole owner of the three output sinks.

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use log::debug;
use std::io::Write;

use crate::engine::classify::Classification;
use crate::{ResultRecord, ScanCounts};

use super::cancel::CancelToken;

/// The three append-only, line-oriented outputs.
#[derive(Debug)]
pub struct Sinks<W> {
    /// Every record.
    pub raw: W,
    /// Records whose line contains "200 ok" (case-insensitive).
    pub success: W,
    /// Records whose line does not contain "404 not found" (case-insensitive).
    pub ex404: W,
}

impl<W> Sinks<W> {
    pub fn new(raw: W, success: W, ex404: W) -> Self {
        Self {
            raw,
            success,
            ex404,
        }
    }
}

/// Writes records to [`Sinks`] and keeps per-sink counts.
pub struct Collector<W: Write> {
    sinks: Sinks<W>,
    counts: ScanCounts,
}

impl<W: Write> Collector<W> {
    pub fn new(sinks: Sinks<W>) -> Self {
        Self {
            sinks,
            counts: ScanCounts::default(),
        }
    }

    /// Raw always; success iff 200 OK; ex-404 iff not 404 Not Found.
    pub fn record(&mut self, record: &ResultRecord) -> Result<()> {
        let class = Classification::of(&record.line);
        writeln!(self.sinks.raw, "{}", record.line).context("write raw log")?;
        self.counts.raw += 1;
        if record.is_error() {
            self.counts.errors += 1;
        }
        if class.is_success {
            writeln!(self.sinks.success, "{}", record.line).context("write 200 OK log")?;
            self.counts.success += 1;
        }
        if class.in_ex404() {
            writeln!(self.sinks.ex404, "{}", record.line).context("write ex-404 log")?;
            self.counts.ex404 += 1;
        }
        Ok(())
    }

    pub fn counts(&self) -> ScanCounts {
        self.counts
    }

    /// Flush every sink and hand them back with the final counts.
    pub fn finish(mut self) -> Result<(Sinks<W>, ScanCounts)> {
        self.sinks.raw.flush().context("flush raw log")?;
        self.sinks.success.flush().context("flush 200 OK log")?;
        self.sinks.ex404.flush().context("flush ex-404 log")?;
        Ok((self.sinks, self.counts))
    }
}

/// Drain `result_rx` into `sinks` until every worker has dropped its sender.
/// On a write failure, cancellation is requested so upstream stages stop, and the error is returned.
/// `on_record` is called after each record is written (e.g. progress updates); keep it fast.
pub fn collect_results<W: Write>(
    result_rx: Receiver<ResultRecord>,
    sinks: Sinks<W>,
    cancel: &CancelToken,
    on_record: Option<&dyn Fn(&ResultRecord)>,
) -> Result<(Sinks<W>, ScanCounts)> {
    let mut collector = Collector::new(sinks);
    while let Ok(record) = result_rx.recv() {
        if let Err(e) = collector.record(&record) {
            cancel.cancel();
            return Err(e.context(format!("recording result for {:?}", record.path)));
        }
        if let Some(f) = on_record {
            f(&record);
        }
    }
    debug!(
        "collector: result queue closed, {} records",
        collector.counts().raw
    );
    collector.finish()
}
