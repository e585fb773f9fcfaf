//! # Example: crash
//!
//! A task body that fails, and a custom subscriber reacting to the crash.
//!
//! Demonstrates how to:
//! - Return a [`TaskError`] from a task body.
//! - Observe `crashed` both by polling [`Supervisor::status`] and through a [`Subscribe`] hook.
//! - Start again after a crash.
//!
//! ## Run
//! ```bash
//! SOLOVISOR_LOG=debug cargo run --example crash
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use solovisor::{Event, EventKind, Subscribe, Supervisor, TaskError, TaskFn, TaskRef};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Counts crashes and prints their cause.
#[derive(Default)]
struct CrashCounter {
    crashes: AtomicU32,
}

#[async_trait]
impl Subscribe for CrashCounter {
    async fn on_event(&self, ev: &Event) {
        if matches!(ev.kind, EventKind::WorkerCrashed) {
            let n = self.crashes.fetch_add(1, Ordering::Relaxed) + 1;
            println!(
                "[crash-counter] run={:?} crash #{n}: {}",
                ev.run,
                ev.detail().unwrap_or("unknown")
            );
        }
    }

    fn name(&self) -> &'static str {
        "crash-counter"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SOLOVISOR_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let flaky: TaskRef = TaskFn::arc("flaky", |ctx: CancellationToken| async move {
        tokio::select! {
            _ = ctx.cancelled() => Ok(()),
            _ = tokio::time::sleep(Duration::from_millis(300)) => {
                Err(TaskError::fail("upstream connection refused"))
            }
        }
    });

    let counter = Arc::new(CrashCounter::default());
    let sup = Supervisor::builder(flaky)
        .with_subscribers(vec![counter.clone() as Arc<dyn Subscribe>])
        .build();

    for attempt in 1..=2 {
        println!("attempt {attempt}: {}", sup.start());
        let settled = sup.wait_settled().await;
        println!("attempt {attempt}: {settled}");
    }

    // Let the subscriber drain its queue.
    tokio::time::sleep(Duration::from_millis(50)).await;
    println!("crashes seen: {}", counter.crashes.load(Ordering::Relaxed));
    Ok(())
}
