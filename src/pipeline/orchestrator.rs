use anyhow::{Result, bail};
use log::{debug, info};
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::engine::probe::Probe;
use crate::pipeline;
use crate::pipeline::cancel::CancelToken;
use crate::pipeline::collector::{Sinks, collect_results};
use crate::pipeline::dictionary::DictionarySource;
use crate::{ResultRecord, ScanOpts, ScanSummary};

/// Output of [`run_scan`]: the sinks (flushed) and what was recorded.
#[derive(Debug)]
pub struct ScanReport<W> {
    pub sinks: Sinks<W>,
    pub summary: ScanSummary,
}

/// Start the dictionary → workers part of the pipeline. Returns the result receiver and handles;
/// caller drains `result_rx` and must join the handles when done.
pub fn start_pipeline<R>(
    dictionary: R,
    prober: Arc<dyn Probe>,
    opts: &ScanOpts,
    cancel: &CancelToken,
) -> Result<pipeline::PipelineHandles>
where
    R: BufRead + Send + 'static,
{
    if opts.concurrency == 0 {
        bail!("concurrency must be at least 1");
    }
    if opts.work_queue_cap == 0 || opts.result_queue_cap == 0 {
        bail!("queue capacities must be at least 1");
    }
    debug!(
        "Starting pipeline: {} workers, work queue {}, result queue {}",
        opts.concurrency, opts.work_queue_cap, opts.result_queue_cap
    );

    let channels = pipeline::create_pipeline_channels(opts);

    let dictionary_handle = pipeline::spawn_dictionary_thread(
        DictionarySource::new(dictionary),
        channels.work_tx,
        cancel.clone(),
    );

    let worker_handles = pipeline::spawn_probe_workers(
        channels.work_rx,
        &channels.result_tx,
        prober,
        cancel,
        opts.concurrency,
    );

    // Dropping the last sender closes the result queue once the workers exit.
    drop(channels.result_tx);

    Ok(pipeline::PipelineHandles {
        result_rx: channels.result_rx,
        dictionary_handle,
        worker_handles,
    })
}

/// Join the dictionary and worker threads. Returns the admitted path count.
pub fn shutdown_pipeline_handles(
    dictionary_handle: JoinHandle<usize>,
    worker_handles: Vec<JoinHandle<()>>,
) -> Result<usize> {
    let mut worker_panicked = false;
    for h in worker_handles {
        worker_panicked |= h.join().is_err();
    }
    let admitted = dictionary_handle
        .join()
        .map_err(|_| anyhow::anyhow!("dictionary thread panicked"))?;
    if worker_panicked {
        bail!("probe worker panicked");
    }
    Ok(admitted)
}

/// Main orchestrator: probe every dictionary path and sort the results into `sinks`.
/// Dictionary → work queue → workers (probe) → result queue → collector (this thread).
///
/// Returns once every worker has exited and the result queue is drained, whether the dictionary
/// ran out or `cancel` was triggered.
pub fn run_scan<R, W>(
    dictionary: R,
    prober: Arc<dyn Probe>,
    sinks: Sinks<W>,
    opts: &ScanOpts,
    cancel: &CancelToken,
    on_record: Option<&dyn Fn(&ResultRecord)>,
) -> Result<ScanReport<W>>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let pipeline::PipelineHandles {
        result_rx,
        dictionary_handle,
        worker_handles,
    } = start_pipeline(dictionary, prober, opts, cancel)?;

    let collected = collect_results(result_rx, sinks, cancel, on_record);
    let admitted = shutdown_pipeline_handles(dictionary_handle, worker_handles)?;
    let (sinks, counts) = collected?;

    let cancelled = cancel.is_cancelled();
    if cancelled {
        info!(
            "Scan interrupted: {} of {} admitted paths recorded",
            counts.raw, admitted
        );
    } else {
        debug!("Scan finished: {} paths probed", counts.raw);
    }

    Ok(ScanReport {
        sinks,
        summary: ScanSummary {
            admitted,
            counts,
            cancelled,
        },
    })
}
