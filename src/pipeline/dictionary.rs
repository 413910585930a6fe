//! Dictionary source: reads candidate paths line by line and feeds the work queue.

use crossbeam_channel::{Sender, select};
use log::{debug, warn};
use std::borrow::Cow;
use std::io::BufRead;
use std::thread::{self, JoinHandle};

use super::cancel::CancelToken;

/// Lazy, non-restartable sequence of trimmed, non-empty paths from a line source.
/// Lines that are not valid UTF-8 are decoded lossily. An I/O error is logged and ends the sequence.
pub struct DictionarySource<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> DictionarySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for DictionarySource<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_no += 1;
                    let line = String::from_utf8_lossy(&self.buf);
                    if let Cow::Owned(_) = line {
                        warn!(
                            "Dictionary line {} is not valid UTF-8; decoding lossily",
                            self.line_no
                        );
                    }
                    let path = line.trim();
                    if !path.is_empty() {
                        return Some(path.to_string());
                    }
                }
                Err(e) => {
                    warn!(
                        "Dictionary read failed after line {}: {}; stopping",
                        self.line_no, e
                    );
                    self.done = true;
                }
            }
        }
        None
    }
}

/// Feed `paths` into `work_tx` until exhausted or cancelled. Cancellation is checked before every
/// path and raced against a full queue. Drops `work_tx` on return (closes the work queue).
/// Returns the number of paths admitted.
pub fn run_dictionary_loop<I>(paths: I, work_tx: Sender<String>, cancel: &CancelToken) -> usize
where
    I: Iterator<Item = String>,
{
    let mut admitted = 0_usize;
    for path in paths {
        if cancel.is_cancelled() {
            break;
        }
        select! {
            send(work_tx, path) -> res => {
                if res.is_err() {
                    break;
                }
                admitted += 1;
            }
            recv(cancel.receiver()) -> _ => break,
        }
    }
    if cancel.is_cancelled() {
        debug!("dictionary: cancelled after {} paths", admitted);
    } else {
        debug!("dictionary: exhausted, {} paths admitted", admitted);
    }
    drop(work_tx);
    admitted
}

pub fn spawn_dictionary_thread<R>(
    source: DictionarySource<R>,
    work_tx: Sender<String>,
    cancel: CancelToken,
) -> JoinHandle<usize>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || run_dictionary_loop(source, work_tx, &cancel))
}
