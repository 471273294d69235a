//! Bounded worker pool with dynamic refill.
//!
//! The controller starts up to `capacity` workers, one per unit of work.
//! Each worker reports on a shared completion channel when it exits; the
//! controller joins it and starts the next pending unit in its place, until
//! every unit has been handed out and every worker has reported.

use std::any::Any;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use divmine_core::errors::SchedulerError;
use divmine_core::traits::{Cancellable, CancellationToken};
use divmine_core::types::collections::FxHashMap;

/// Pool sizing and watchdog settings.
#[derive(Debug, Clone)]
pub struct WorkQueue {
    name: &'static str,
    capacity: usize,
    worker_timeout: Option<Duration>,
}

/// Counters for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolReport {
    pub units: usize,
    pub max_active: usize,
}

/// Sent by every worker as it exits, including by unwinding.
struct Completion {
    unit: usize,
    panicked: bool,
}

/// Reports completion from `Drop`, so a panicking job still signals.
struct CompletionGuard {
    unit: usize,
    tx: Sender<Completion>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        // The controller may have given up on this run already.
        let _ = self.tx.send(Completion {
            unit: self.unit,
            panicked: thread::panicking(),
        });
    }
}

struct ActiveWorker {
    handle: JoinHandle<()>,
    started: Instant,
}

impl WorkQueue {
    /// `capacity` is clamped to at least one worker.
    pub fn new(name: &'static str, capacity: usize, worker_timeout: Option<Duration>) -> Self {
        Self {
            name,
            capacity: capacity.max(1),
            worker_timeout,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Run `job` once for every unit, at most `capacity` at a time.
    ///
    /// Fails on the first worker panic or timeout; remaining workers are
    /// detached. On cancellation no further units start, running ones are
    /// drained, and `SchedulerError::Cancelled` is returned.
    pub fn run<U, F>(
        &self,
        units: Vec<U>,
        job: F,
        cancel: &CancellationToken,
    ) -> Result<PoolReport, SchedulerError>
    where
        U: Send + 'static,
        F: Fn(U) + Send + Sync + 'static,
    {
        let total = units.len();
        let job = Arc::new(job);
        let (tx, rx) = crossbeam_channel::unbounded::<Completion>();
        let mut pending = units.into_iter().enumerate();
        let mut active: FxHashMap<usize, ActiveWorker> = FxHashMap::default();
        let mut report = PoolReport {
            units: total,
            max_active: 0,
        };

        tracing::debug!(pool = self.name, units = total, capacity = self.capacity, "starting pool");

        for _ in 0..self.capacity {
            if cancel.is_cancelled() {
                break;
            }
            let Some((unit, payload)) = pending.next() else {
                break;
            };
            self.spawn(unit, payload, &job, &tx, &mut active)?;
        }
        report.max_active = active.len();

        while !active.is_empty() {
            let completion = self.next_completion(&rx, &active)?;
            let Some(worker) = active.remove(&completion.unit) else {
                continue;
            };
            let joined = worker.handle.join();
            if completion.panicked || joined.is_err() {
                let message = joined.err().map(panic_message).unwrap_or_default();
                tracing::warn!(pool = self.name, unit = completion.unit, %message, "worker panicked");
                return Err(SchedulerError::WorkerPanicked {
                    pool: self.name.to_string(),
                    unit: completion.unit,
                    message,
                });
            }
            tracing::debug!(
                pool = self.name,
                unit = completion.unit,
                elapsed_ms = worker.started.elapsed().as_millis() as u64,
                "unit complete"
            );

            if cancel.is_cancelled() {
                continue;
            }
            if let Some((unit, payload)) = pending.next() {
                self.spawn(unit, payload, &job, &tx, &mut active)?;
                report.max_active = report.max_active.max(active.len());
            }
        }

        if cancel.is_cancelled() && pending.next().is_some() {
            tracing::warn!(pool = self.name, "run cancelled before all units started");
            return Err(SchedulerError::Cancelled);
        }
        Ok(report)
    }

    fn spawn<U, F>(
        &self,
        unit: usize,
        payload: U,
        job: &Arc<F>,
        tx: &Sender<Completion>,
        active: &mut FxHashMap<usize, ActiveWorker>,
    ) -> Result<(), SchedulerError>
    where
        U: Send + 'static,
        F: Fn(U) + Send + Sync + 'static,
    {
        let job = Arc::clone(job);
        let guard = CompletionGuard {
            unit,
            tx: tx.clone(),
        };
        let handle = thread::Builder::new()
            .name(format!("{}-{}", self.name, unit))
            .spawn(move || {
                let _guard = guard;
                job(payload);
            })
            .map_err(|e| SchedulerError::Spawn {
                pool: self.name.to_string(),
                message: e.to_string(),
            })?;
        tracing::trace!(pool = self.name, unit, "worker spawned");
        active.insert(
            unit,
            ActiveWorker {
                handle,
                started: Instant::now(),
            },
        );
        Ok(())
    }

    /// Wait for the next completion, no longer than the oldest worker's deadline.
    fn next_completion(
        &self,
        rx: &Receiver<Completion>,
        active: &FxHashMap<usize, ActiveWorker>,
    ) -> Result<Completion, SchedulerError> {
        let Some(timeout) = self.worker_timeout else {
            return rx.recv().map_err(|_| self.disconnected());
        };
        let Some((&oldest_unit, oldest)) = active.iter().min_by_key(|(_, w)| w.started) else {
            return rx.recv().map_err(|_| self.disconnected());
        };
        match rx.recv_deadline(oldest.started + timeout) {
            Ok(completion) => Ok(completion),
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(pool = self.name, unit = oldest_unit, "worker timed out");
                Err(SchedulerError::WorkerTimeout {
                    pool: self.name.to_string(),
                    unit: oldest_unit,
                    timeout_ms: timeout.as_millis() as u64,
                })
            }
            Err(RecvTimeoutError::Disconnected) => Err(self.disconnected()),
        }
    }

    fn disconnected(&self) -> SchedulerError {
        SchedulerError::Disconnected {
            pool: self.name.to_string(),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn runs_every_unit_once() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let queue = WorkQueue::new("test", 3, None);
        let report = queue
            .run(
                (0..20).collect(),
                move |u: usize| sink.lock().unwrap().push(u),
                &CancellationToken::new(),
            )
            .unwrap();
        let mut seen = seen.lock().unwrap().clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
        assert_eq!(report.units, 20);
        assert!(report.max_active <= 3);
    }

    #[test]
    fn never_exceeds_capacity() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (r, p) = (Arc::clone(&running), Arc::clone(&peak));
        let queue = WorkQueue::new("test", 2, None);
        queue
            .run(
                (0..10).collect(),
                move |_: usize| {
                    let now = r.fetch_add(1, Ordering::SeqCst) + 1;
                    p.fetch_max(now, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(5));
                    r.fetch_sub(1, Ordering::SeqCst);
                },
                &CancellationToken::new(),
            )
            .unwrap();
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[test]
    fn empty_unit_list_is_ok() {
        let queue = WorkQueue::new("test", 4, None);
        let report = queue
            .run(Vec::<usize>::new(), |_| {}, &CancellationToken::new())
            .unwrap();
        assert_eq!(report, PoolReport::default());
    }

    #[test]
    fn panic_is_reported_not_deadlocked() {
        let queue = WorkQueue::new("test", 2, None);
        let err = queue
            .run(
                (0..5).collect(),
                |u: usize| {
                    if u == 3 {
                        panic!("unit three failed");
                    }
                },
                &CancellationToken::new(),
            )
            .unwrap_err();
        match err {
            SchedulerError::WorkerPanicked { unit, message, .. } => {
                assert_eq!(unit, 3);
                assert!(message.contains("unit three failed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn hung_worker_times_out() {
        let queue = WorkQueue::new("test", 1, Some(Duration::from_millis(50)));
        let err = queue
            .run(
                vec![0usize],
                |_| thread::sleep(Duration::from_millis(500)),
                &CancellationToken::new(),
            )
            .unwrap_err();
        assert!(matches!(err, SchedulerError::WorkerTimeout { unit: 0, .. }));
    }

    #[test]
    fn cancellation_stops_refill() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let started = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&started);
        let queue = WorkQueue::new("test", 1, None);
        let err = queue
            .run(
                (0..10).collect(),
                move |_: usize| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    trigger.cancel();
                },
                &cancel,
            )
            .unwrap_err();
        assert!(matches!(err, SchedulerError::Cancelled));
        assert_eq!(started.load(Ordering::SeqCst), 1);
    }
}
