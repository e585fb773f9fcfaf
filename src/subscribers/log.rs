//! # LogWriter - events rendered as `tracing` records
//!
//! A minimal subscriber that turns every [`Event`] into one structured
//! `tracing` record under the `solovisor` target. The library never installs a
//! `tracing` subscriber itself; hosts decide where the records go.
//!
//! ## Example output (with `tracing_subscriber::fmt`)
//! ```text
//! INFO  solovisor: starting task="bot" run=1 detail="launching"
//! INFO  solovisor: running task="bot" run=1 detail="started"
//! INFO  solovisor: stop-requested task="bot" run=1 detail="stop requested"
//! INFO  solovisor: stopped task="bot" run=1 detail="finished"
//! WARN  solovisor: crashed task="bot" run=2 detail="execution failed: boom"
//! DEBUG solovisor: stop-ignored task="bot" detail="already stopped"
//! ```

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let task = e.task.as_deref().unwrap_or("unknown");
        let detail = e.detail().unwrap_or("");
        let label = e.kind.as_label();

        match e.kind {
            EventKind::WorkerCrashed => {
                warn!(target: "solovisor", task, run = e.run, detail, "{label}");
            }
            EventKind::StartIgnored | EventKind::StopIgnored => {
                debug!(target: "solovisor", task, run = e.run, detail, "{label}");
            }
            EventKind::WorkerStarting
            | EventKind::WorkerRunning
            | EventKind::StopRequested
            | EventKind::WorkerStopped => {
                info!(target: "solovisor", task, run = e.run, detail, "{label}");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{State, Status};
    use crate::subscribers::SubscriberSet;
    use std::sync::Arc;
    use tokio::runtime::Handle;

    #[tokio::test]
    async fn writes_every_event_kind() {
        let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
        let set = SubscriberSet::new(subs, &Handle::current());

        let events = [
            (EventKind::WorkerStarting, State::Starting, "launching"),
            (EventKind::WorkerRunning, State::Running, "started"),
            (EventKind::StartIgnored, State::Running, "already running"),
            (EventKind::StopRequested, State::Stopping, "stop requested"),
            (EventKind::WorkerStopped, State::Stopped, "finished"),
            (EventKind::WorkerCrashed, State::Crashed, "execution failed: boom"),
            (EventKind::StopIgnored, State::Stopped, "already stopped"),
        ];
        for (kind, state, detail) in events {
            set.emit(
                &Event::new(kind)
                    .with_task("bot")
                    .with_run(1)
                    .with_status(Status::new(state, detail)),
            );
        }
        // Missing task name and status fall back to placeholders.
        set.emit(&Event::new(EventKind::StopIgnored));

        set.shutdown().await;
        assert_eq!(LogWriter::new().name(), "LogWriter");
    }
}
