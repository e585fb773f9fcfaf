//! State shared between the supervisor handle and its worker.
//!
//! All status writes funnel through [`Shared::apply`] while the lock is held,
//! so the stored [`Status`] and the published [`Event`] sequence stay in the
//! same linear order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::core::status::{self, State, Status};
use crate::events::{Bus, Event, EventKind};

/// The live run's execution context. Never handed out of the supervisor.
pub(crate) struct Worker {
    /// Run number (1-based, monotonic per supervisor).
    pub run: u64,
    /// The run's cancellation signal.
    pub token: CancellationToken,
    /// Join handle of the worker task.
    pub join: JoinHandle<()>,
}

/// Lock-protected part of the supervisor.
pub(crate) struct Inner {
    pub status: Status,
    pub worker: Option<Worker>,
    pub runs: u64,
}

pub(crate) struct Shared {
    inner: Mutex<Inner>,
    pub bus: Bus,
    pub task_name: Arc<str>,
}

impl Shared {
    pub fn new(bus: Bus, task_name: Arc<str>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                status: Status::idle(),
                worker: None,
                runs: 0,
            }),
            bus,
            task_name,
        }
    }

    /// Acquires the lock. Status is replaced wholesale, so a poisoned guard is still consistent.
    pub fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `status` and publishes the matching event. Caller holds the lock.
    pub fn apply(
        &self,
        inner: &mut Inner,
        kind: EventKind,
        run: Option<u64>,
        status: Status,
    ) -> Status {
        inner.status = status.clone();

        let mut ev = Event::new(kind)
            .with_task(Arc::clone(&self.task_name))
            .with_status(status.clone());
        if let Some(run) = run {
            ev = ev.with_run(run);
        }
        self.bus.publish(ev);
        status
    }

    /// Returns the live run number, reclaiming a slot whose worker vanished without settling.
    pub fn live_run(&self, inner: &mut Inner) -> Option<u64> {
        let (run, finished) = match &inner.worker {
            Some(w) => (w.run, w.join.is_finished()),
            None => return None,
        };
        if !finished {
            return Some(run);
        }

        warn!(task = %self.task_name, run, "reclaiming worker slot that was never settled");
        inner.worker = None;
        self.apply(
            inner,
            EventKind::WorkerCrashed,
            Some(run),
            Status::new(State::Crashed, status::WORKER_ABORTED),
        );
        None
    }

    /// Current status, with an unsettled finished worker reported as `crashed`.
    ///
    /// The runtime may drop a worker before its first poll, in which case the
    /// worker never gets to settle its own run.
    pub fn snapshot(&self) -> Status {
        let mut inner = self.lock();
        self.live_run(&mut inner);
        inner.status.clone()
    }

    /// Worker entered the task body: `starting → running`.
    ///
    /// Leaves the status alone if the run is no longer `starting` (a stop or a
    /// redundant start got there first).
    pub fn enter_running(&self, run: u64) {
        let mut inner = self.lock();
        let owns_slot = inner.worker.as_ref().is_some_and(|w| w.run == run);
        if owns_slot && inner.status.state() == State::Starting {
            self.apply(
                &mut inner,
                EventKind::WorkerRunning,
                Some(run),
                Status::new(State::Running, status::STARTED),
            );
        }
    }

    /// Worker finished: frees the slot and stores the terminal status atomically.
    ///
    /// Ignored when `run` no longer owns the slot.
    pub fn settle(&self, run: u64, status: Status) {
        let mut inner = self.lock();
        if !inner.worker.as_ref().is_some_and(|w| w.run == run) {
            return;
        }
        inner.worker = None;

        let kind = match status.state() {
            State::Crashed => EventKind::WorkerCrashed,
            _ => EventKind::WorkerStopped,
        };
        self.apply(&mut inner, kind, Some(run), status);
    }
}
