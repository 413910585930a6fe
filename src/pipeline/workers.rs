use crossbeam_channel::{Receiver, Sender, select};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::ResultRecord;
use crate::engine::probe::Probe;

use super::cancel::CancelToken;

/// Single probe worker: pull a path, probe it, push the record. Both queue operations race the
/// cancellation signal. Exits when the work queue is closed and empty, when cancelled, or when the
/// result queue has no receiver left.
fn probe_worker_loop(
    work_rx: Receiver<String>,
    result_tx: Sender<ResultRecord>,
    prober: Arc<dyn Probe>,
    cancel: CancelToken,
) {
    loop {
        let path = select! {
            recv(cancel.receiver()) -> _ => break,
            recv(work_rx) -> msg => match msg {
                Ok(path) => path,
                Err(_) => break,
            },
        };
        // Both arms may have been ready; cancellation wins before any new probe starts.
        if cancel.is_cancelled() {
            break;
        }
        let outcome = prober.probe(&path);
        let record = ResultRecord::new(path, &outcome);
        select! {
            send(result_tx, record) -> res => {
                if res.is_err() {
                    break;
                }
            }
            recv(cancel.receiver()) -> _ => break,
        }
    }
    drop(result_tx);
}

/// Spawn `num_workers` probe workers sharing `work_rx` and `prober`. Caller must drop its own
/// `result_tx` after this so the result queue closes when the last worker exits.
pub fn spawn_probe_workers(
    work_rx: Receiver<String>,
    result_tx: &Sender<ResultRecord>,
    prober: Arc<dyn Probe>,
    cancel: &CancelToken,
    num_workers: usize,
) -> Vec<JoinHandle<()>> {
    (0..num_workers)
        .map(|_| {
            let work_rx = work_rx.clone();
            let result_tx = result_tx.clone();
            let prober = Arc::clone(&prober);
            let cancel = cancel.clone();
            thread::spawn(move || probe_worker_loop(work_rx, result_tx, prober, cancel))
        })
        .collect()
}
