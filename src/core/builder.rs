use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use crate::{
    core::{SupervisorConfig, shared::Shared, supervisor::Supervisor},
    events::Bus,
    subscribers::{Subscribe, SubscriberSet},
    tasks::TaskRef,
};

/// Builder for constructing a [`Supervisor`] around one task body.
pub struct SupervisorBuilder {
    task: TaskRef,
    cfg: SupervisorConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
    runtime: Option<Handle>,
}

impl SupervisorBuilder {
    /// Creates a new builder for the given task body with default configuration.
    pub fn new(task: TaskRef) -> Self {
        Self {
            task,
            cfg: SupervisorConfig::default(),
            subscribers: Vec::new(),
            runtime: None,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: SupervisorConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive every status transition through dedicated workers
    /// with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Runtime on which workers and subscriber tasks are spawned.
    ///
    /// Lets [`Supervisor::start`] be called from threads that are not part of
    /// any Tokio runtime.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Builds and returns the Supervisor instance.
    ///
    /// The supervisor starts `idle`; nothing runs until [`Supervisor::start`].
    ///
    /// # Panics
    /// Panics if no runtime was given with [`with_runtime`](Self::with_runtime)
    /// and this is called outside of a Tokio runtime.
    pub fn build(self) -> Arc<Supervisor> {
        let runtime = self.runtime.unwrap_or_else(Handle::current);
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let task_name: Arc<str> = Arc::from(self.task.name());

        if !self.subscribers.is_empty() {
            spawn_subscriber_listener(&runtime, &bus, self.subscribers);
        }

        let shared = Arc::new(Shared::new(bus, task_name));
        Arc::new(Supervisor::new_internal(self.cfg, self.task, runtime, shared))
    }
}

/// Forwards bus events into a [`SubscriberSet`] until the bus closes.
fn spawn_subscriber_listener(
    runtime: &Handle,
    bus: &Bus,
    subscribers: Vec<Arc<dyn Subscribe>>,
) {
    let set = SubscriberSet::new(subscribers, runtime);
    let mut rx = bus.subscribe();

    runtime.spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => set.emit(&ev),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "subscriber listener lagged behind the event bus");
                }
                Err(RecvError::Closed) => break,
            }
        }
        set.shutdown().await;
    });
}
