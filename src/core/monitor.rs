//! Per-product polling task.
//!
//! Each cycle fetches availability, compares it with the last distinct
//! snapshot, and decides how long to sleep before the next cycle or whether
//! the task is finished:
//!
//! ```text
//! fetch ──► TransportError ─────────────────────────► sleep(error)
//!       ├─► NotYetAvailable ────────────────────────► sleep(not_loaded)
//!       └─► Success ─► same as last ────────────────► sleep(standard)
//!                    └─► changed ─► nothing in stock ► Done
//!                                └─► in stock ─► metadata ─► notify ─► sleep(standard)
//! ```

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use super::client::{AvailabilityClient, AvailabilityResult};
use super::config::PollIntervals;
use super::product::{ProductId, VariantSnapshot};
use super::notifier::Notifier;

/// What the task does after a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Sleep(Duration),
    Done,
}

/// Mutable state owned by a single task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorState {
    pub product: ProductId,
    pub last_snapshot: Option<VariantSnapshot>,
    pub task: usize,
}

impl MonitorState {
    pub fn new(product: ProductId, task: usize) -> Self {
        Self {
            product,
            last_snapshot: None,
            task,
        }
    }
}

pub struct Monitor {
    state: MonitorState,
    client: Arc<dyn AvailabilityClient>,
    notifier: Arc<dyn Notifier>,
    intervals: PollIntervals,
}

impl Monitor {
    pub fn new(
        product: ProductId,
        task: usize,
        client: Arc<dyn AvailabilityClient>,
        notifier: Arc<dyn Notifier>,
        intervals: PollIntervals,
    ) -> Self {
        Self {
            state: MonitorState::new(product, task),
            client,
            notifier,
            intervals,
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Poll until the product sells out or shutdown is signalled.
    ///
    /// Returns the final state.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> MonitorState {
        log::info!("Starting task {} ({})...", self.state.task, self.state.product);

        loop {
            let delay = match self.poll().await {
                Step::Sleep(delay) => delay,
                Step::Done => break,
            };

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.recv() => {
                    log::info!("Stopping task {}", self.state.task);
                    break;
                }
            }
        }

        self.state
    }

    /// Run one fetch-compare-act cycle.
    pub async fn poll(&mut self) -> Step {
        let task = self.state.task;

        let result = self.client.fetch_availability(&self.state.product).await;

        match result {
            AvailabilityResult::TransportError(e) => {
                log::warn!("Request failed, retrying on task {}: {}", task, e);
                Step::Sleep(self.intervals.error())
            }
            AvailabilityResult::NotYetAvailable => {
                log::info!("No stock loaded on task {}", task);
                Step::Sleep(self.intervals.not_loaded())
            }
            AvailabilityResult::Success { id, snapshot } => self.on_snapshot(id, snapshot).await,
        }
    }

    async fn on_snapshot(&mut self, id: String, snapshot: VariantSnapshot) -> Step {
        let task = self.state.task;

        if self.state.last_snapshot.as_ref() == Some(&snapshot) {
            log::info!("Stock is the same on task {}", task);
            return Step::Sleep(self.intervals.standard());
        }

        let in_stock = snapshot.in_stock();
        self.state.last_snapshot = Some(snapshot);

        if in_stock.is_empty() {
            log::info!("Product has sold out on task {}", task);
            return Step::Done;
        }

        // Metadata only decorates the message; a failed read still notifies.
        let metadata = match self.client.fetch_metadata(&id).await {
            Ok(meta) => Some(meta),
            Err(e) => {
                log::warn!("Unable to fetch product details on task {}: {}", task, e);
                None
            }
        };

        self.notifier
            .notify(task, &id, &in_stock, metadata.as_ref())
            .await;

        log::info!("Task {} has stock:", task);
        for variant in &in_stock {
            log::info!("Size: {}, Stock: {}", variant.size, variant.stock_display());
        }

        Step::Sleep(self.intervals.standard())
    }
}
