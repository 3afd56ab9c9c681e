//! Interactive coordinate selection as an explicit request/response channel
//!
//! A picker job runs on a worker thread and answers through a one-shot
//! [`PickReply`]. The caller owns the [`PickerHandle`] and applies the
//! outcome on its own thread, so the worker never needs the repository.

use std::io::BufRead;
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;

use crate::model::Coordinate;

/// Result of one selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickOutcome {
    Selected(Coordinate),
    Cancelled,
}

impl PickOutcome {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            PickOutcome::Selected(coordinate) => Some(*coordinate),
            PickOutcome::Cancelled => None,
        }
    }
}

/// One-shot answer slot handed to the picker job
///
/// Consumed by `select` or `cancel`. Dropping it unanswered (including
/// while a panicking job unwinds) publishes `Cancelled`.
#[derive(Debug)]
pub struct PickReply {
    tx: Option<Sender<PickOutcome>>,
}

impl PickReply {
    pub fn select(mut self, coordinate: Coordinate) {
        self.send(PickOutcome::Selected(coordinate));
    }

    pub fn cancel(mut self) {
        self.send(PickOutcome::Cancelled);
    }

    fn send(&mut self, outcome: PickOutcome) {
        if let Some(tx) = self.tx.take() {
            // The handle may already be gone; nobody is waiting then.
            let _ = tx.send(outcome);
        }
    }
}

impl Drop for PickReply {
    fn drop(&mut self) {
        self.send(PickOutcome::Cancelled);
    }
}

/// Caller side of a running picker
#[derive(Debug)]
pub struct PickerHandle {
    rx: Receiver<PickOutcome>,
    worker: Option<JoinHandle<()>>,
    outcome: Option<PickOutcome>,
}

impl PickerHandle {
    /// Block until the job answers
    pub fn wait(mut self) -> PickOutcome {
        let outcome = match self.outcome.take() {
            Some(outcome) => outcome,
            None => self.rx.recv().unwrap_or(PickOutcome::Cancelled),
        };
        self.join_worker();
        outcome
    }

    /// Poll for the answer without blocking
    pub fn try_outcome(&mut self) -> Option<PickOutcome> {
        if self.outcome.is_none() {
            self.outcome = match self.rx.try_recv() {
                Ok(outcome) => Some(outcome),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => Some(PickOutcome::Cancelled),
            };
        }
        self.outcome
    }

    fn join_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!(op = "pick", "picker worker panicked");
            }
        }
    }
}

/// Run `job` on a worker thread and return the handle receiving its answer
pub fn spawn_picker<F>(job: F) -> PickerHandle
where
    F: FnOnce(PickReply) + Send + 'static,
{
    let (tx, rx) = bounded(1);
    let reply = PickReply { tx: Some(tx) };
    let worker = std::thread::spawn(move || job(reply));

    PickerHandle {
        rx,
        worker: Some(worker),
        outcome: None,
    }
}

/// Answer `reply` from `"lat,lng"` lines read from `reader`
///
/// Invalid lines are logged and skipped. A blank line, `q`, or end of input
/// cancels.
pub fn pick_from_reader<R: BufRead>(reader: R, reply: PickReply) {
    for line in reader.lines() {
        let Ok(line) = line else {
            break;
        };
        let text = line.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("q") {
            break;
        }
        match Coordinate::parse_pair(text) {
            Ok(coordinate) => {
                reply.select(coordinate);
                return;
            }
            Err(err) => {
                tracing::warn!(op = "pick", input = text, error = %err, "ignoring invalid coordinate pair");
            }
        }
    }
    reply.cancel();
}
