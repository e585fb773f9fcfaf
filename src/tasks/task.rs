//! # Task body abstraction.
//!
//! The supervisor does not know what its task body does. It only knows the
//! [`Task`] contract: a name for logs, and an async [`run`](Task::run) that
//! receives a [`CancellationToken`] and returns once its work is done or once
//! the token is cancelled.
//!
//! The common handle type is [`TaskRef`], an `Arc<dyn Task>` shared between
//! the supervisor and each of its runs.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Shared handle to a task body.
pub type TaskRef = Arc<dyn Task>;

/// # Asynchronous, cooperatively cancelable unit of work.
///
/// Each successful [`Supervisor::start`](crate::Supervisor::start) calls
/// [`run`](Task::run) exactly once with a token that is not yet cancelled.
/// [`Supervisor::stop`](crate::Supervisor::stop) cancels that token; the
/// supervisor never aborts `run` itself, so implementors must check the token
/// at reasonable intervals and return promptly once it fires.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use async_trait::async_trait;
/// use solovisor::{Task, TaskError};
///
/// struct Ticker;
///
/// #[async_trait]
/// impl Task for Ticker {
///     fn name(&self) -> &str { "ticker" }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
///         while !ctx.is_cancelled() {
///             tokio::time::sleep(Duration::from_millis(100)).await;
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Executes the task body until completion or cancellation.
    ///
    /// - `Ok(())` or `Err(TaskError::Canceled)` settles the run as `stopped`.
    /// - Any other error settles the run as `crashed`.
    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError>;
}
