//! Cooperative cancellation shared by the dictionary thread, every worker and the collector.
//!
//! The token is a write-once flag plus a broadcast channel that disconnects when the flag is set.
//! Blocking stages put [`CancelToken::receiver`] in a `crossbeam_channel::select!` arm next to their
//! queue operation, so a full or empty queue never delays shutdown. In-flight probes are not
//! interrupted; a worker notices cancellation at its next queue rendezvous.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

struct Inner {
    cancelled: AtomicBool,
    /// Dropped on cancel; never sent on. Disconnecting wakes every `select!` waiting on `rx`.
    trigger: Mutex<Option<Sender<()>>>,
    rx: Receiver<()>,
}

/// Cloneable handle to a single run's cancellation signal. Once set it never resets.
#[derive(Clone)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, rx) = bounded::<()>(0);
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                trigger: Mutex::new(Some(tx)),
                rx,
            }),
        }
    }

    /// Request cancellation. Safe from any thread (e.g. a Ctrl+C handler).
    /// Returns true only for the call that actually flipped the signal.
    pub fn cancel(&self) -> bool {
        if self.inner.cancelled.swap(true, Ordering::SeqCst) {
            return false;
        }
        // Flag is visible before the channel disconnects.
        match self.inner.trigger.lock() {
            Ok(mut trigger) => drop(trigger.take()),
            Err(poisoned) => drop(poisoned.into_inner().take()),
        }
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Select arm that becomes ready (disconnected) once cancellation is requested.
    pub fn receiver(&self) -> &Receiver<()> {
        &self.inner.rx
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
