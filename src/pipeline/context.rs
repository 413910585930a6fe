//! Pipeline channels and handles: the two bounded queues and the threads that use them.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::thread::JoinHandle;

use crate::{ResultRecord, ScanOpts};

/// Work queue (dictionary → workers) and result queue (workers → collector).
/// Dictionary thread gets `work_tx`; workers get `work_rx` + clones of `result_tx`; the collector gets `result_rx`.
pub struct PipelineChannels {
    pub work_tx: Sender<String>,
    pub work_rx: Receiver<String>,
    pub result_tx: Sender<ResultRecord>,
    pub result_rx: Receiver<ResultRecord>,
}

pub fn create_pipeline_channels(opts: &ScanOpts) -> PipelineChannels {
    let (work_tx, work_rx) = bounded::<String>(opts.work_queue_cap);
    let (result_tx, result_rx) = bounded::<ResultRecord>(opts.result_queue_cap);
    PipelineChannels {
        work_tx,
        work_rx,
        result_tx,
        result_rx,
    }
}

/// Handles returned by [`start_pipeline`](super::start_pipeline): receive records from `result_rx`,
/// then join `dictionary_handle` and `worker_handles`. `result_rx` disconnects once every worker exits.
pub struct PipelineHandles {
    pub result_rx: Receiver<ResultRecord>,
    /// Yields the number of admitted paths.
    pub dictionary_handle: JoinHandle<usize>,
    pub worker_handles: Vec<JoinHandle<()>>,
}
