//! Worker reaper
//!
//! Joins finished connection workers on its own thread so the accept loop
//! never waits on a worker.

use std::collections::{HashMap, HashSet};
use std::io;
use std::thread::{self, JoinHandle};

use crossbeam::channel::Receiver;

/// Lifecycle events for connection workers
pub(crate) enum WorkerEvent {
    /// Sent by the listener once the worker thread exists
    Spawned(u64, JoinHandle<()>),

    /// Sent by the worker as its last action
    Finished(u64),
}

/// Start the reaper thread
///
/// The thread exits once every sender is gone, after joining all
/// outstanding workers, and returns how many it joined.
pub(crate) fn spawn(events: Receiver<WorkerEvent>) -> io::Result<JoinHandle<usize>> {
    thread::Builder::new()
        .name("otp-reaper".to_string())
        .spawn(move || Reaper::default().run(events))
}

#[derive(Default)]
struct Reaper {
    /// Workers still running
    running: HashMap<u64, JoinHandle<()>>,

    /// Finished before the listener reported the spawn
    early: HashSet<u64>,

    reaped: usize,
}

impl Reaper {
    fn run(mut self, events: Receiver<WorkerEvent>) -> usize {
        for event in events.iter() {
            match event {
                WorkerEvent::Spawned(id, handle) => {
                    if self.early.remove(&id) {
                        self.join(id, handle);
                    } else {
                        self.running.insert(id, handle);
                    }
                }
                WorkerEvent::Finished(id) => match self.running.remove(&id) {
                    Some(handle) => self.join(id, handle),
                    None => {
                        self.early.insert(id);
                    }
                },
            }
        }

        for (id, handle) in std::mem::take(&mut self.running) {
            self.join(id, handle);
        }

        tracing::debug!("Reaper exiting after joining {} workers", self.reaped);
        self.reaped
    }

    fn join(&mut self, id: u64, handle: JoinHandle<()>) {
        if handle.join().is_err() {
            tracing::warn!("Worker {} panicked", id);
        }
        self.reaped += 1;
    }
}
