//! Worker pool
//!
//! Bounded pool of blocking-capable threads shared across connections.
//! Process-wide state with an explicit lifecycle: created at server
//! start, drained on shutdown. Tasks are one-shot and never cancelled;
//! a saturated queue rejects instead of queuing without bound.

use crate::{BridgeError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

/// One-shot unit of work: run on a pool thread, consumed exactly once.
pub struct Task {
    work: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
    pub fn new(work: impl FnOnce() + Send + 'static) -> Self {
        Self {
            work: Box::new(work),
        }
    }

    fn run(self) {
        (self.work)()
    }
}

/// Bounded worker pool
pub struct WorkerPool {
    /// Queue sender; taken on shutdown so the threads see a closed
    /// channel once the backlog drains.
    tx: Mutex<Option<Sender<Task>>>,

    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
    /// Spawn `threads` pool threads behind a queue of `queue_depth` tasks.
    pub fn new(threads: usize, queue_depth: usize) -> Result<Self> {
        let (tx, rx) = bounded::<Task>(queue_depth);

        let mut workers = Vec::with_capacity(threads);
        for i in 0..threads {
            let rx = rx.clone();
            let handle = thread::Builder::new()
                .name(format!("inspect-pool-{}", i))
                .spawn(move || worker_loop(i, rx))?;
            workers.push(handle);
        }

        debug!(threads, queue_depth, "worker pool started");

        Ok(Self {
            tx: Mutex::new(Some(tx)),
            workers: Mutex::new(workers),
        })
    }

    /// Hand a task to the pool without blocking the event loop.
    ///
    /// Fails with `PoolRejected` when the queue is full or the pool is
    /// shutting down. The caller surfaces that as a hard pipeline error;
    /// retry policy belongs to the host, not here.
    pub fn submit(&self, task: Task) -> Result<()> {
        let guard = self.tx.lock();
        match guard.as_ref() {
            Some(tx) => tx.try_send(task).map_err(|_| BridgeError::PoolRejected),
            None => Err(BridgeError::PoolRejected),
        }
    }

    /// Drain the queue and join every thread.
    ///
    /// Queued and in-flight tasks run to completion first; there is no
    /// cancellation. The host must not release suspended requests until
    /// this returns.
    pub fn shutdown(&self) {
        if self.tx.lock().take().is_none() {
            return;
        }

        debug!("worker pool draining");
        let workers = std::mem::take(&mut *self.workers.lock());
        for handle in workers {
            if handle.join().is_err() {
                error!("worker pool thread panicked");
            }
        }
        debug!("worker pool drained");
    }
}

fn worker_loop(index: usize, rx: Receiver<Task>) {
    debug!(index, "pool thread up");
    while let Ok(task) = rx.recv() {
        task.run();
    }
    debug!(index, "pool thread down");
}
