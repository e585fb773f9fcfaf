//! # Example: basic
//!
//! Start, stop and restart one long-running task body.
//!
//! Demonstrates how to:
//! - Define a cooperatively cancelled task body with [`TaskFn`].
//! - Drive it with [`Supervisor::start`] / [`Supervisor::stop`].
//! - Watch transitions through the built-in [`LogWriter`].
//!
//! ## Flow
//! ```text
//! start()  ──► starting ──► running   (ticks every 200ms)
//! stop()   ──► stopping ──► stopped   (body sees the token, returns)
//! start()  ──► starting ──► running   (fresh token, second run)
//! Ctrl-C   ──► shutdown(grace)        (stop + bounded wait)
//! ```
//!
//! ## Run
//! ```bash
//! SOLOVISOR_LOG=debug cargo run --example basic
//! ```

use std::{sync::Arc, time::Duration};

use solovisor::{LogWriter, Subscribe, Supervisor, SupervisorConfig, TaskError, TaskFn, TaskRef};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SOLOVISOR_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let ticker: TaskRef = TaskFn::arc("ticker", |ctx: CancellationToken| async move {
        let mut n = 0u32;
        while !ctx.is_cancelled() {
            n += 1;
            tracing::info!(tick = n, "working");
            tokio::select! {
                _ = ctx.cancelled() => {}
                _ = tokio::time::sleep(Duration::from_millis(200)) => {}
            }
        }
        Ok::<(), TaskError>(())
    });

    let cfg = SupervisorConfig {
        grace: Duration::from_secs(2),
        ..SupervisorConfig::default()
    };
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let sup = Supervisor::builder(ticker)
        .with_config(cfg)
        .with_subscribers(subs)
        .build();

    println!("start   -> {}", sup.start());
    println!("start   -> {}", sup.start());
    tokio::time::sleep(Duration::from_millis(700)).await;

    println!("stop    -> {}", sup.stop());
    println!("settled -> {}", sup.wait_settled().await);
    println!("stop    -> {}", sup.stop());

    println!("restart -> {}", sup.start());
    println!("press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    let settled = sup.shutdown_default().await?;
    println!("final   -> {settled} (runs: {})", sup.run_count());
    Ok(())
}
