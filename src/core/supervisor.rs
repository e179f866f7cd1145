//! Starts one monitor task per configured product.

use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinSet;

use super::client::{build_http_client, AvailabilityClient, YeezySupplyClient};
use super::config::{Config, PollIntervals};
use super::monitor::{Monitor, MonitorState};
use super::notifier::{DiscordNotifier, Notifier};
use super::product::ProductId;
use super::webhook::WebhookTarget;
use crate::error::Result;

pub struct Supervisor {
    client: Arc<dyn AvailabilityClient>,
    notifier: Arc<dyn Notifier>,
    intervals: PollIntervals,
    shutdown_tx: broadcast::Sender<()>,
    tasks: JoinSet<MonitorState>,
}

impl Supervisor {
    pub fn new(
        client: Arc<dyn AvailabilityClient>,
        notifier: Arc<dyn Notifier>,
        intervals: PollIntervals,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        Self {
            client,
            notifier,
            intervals,
            shutdown_tx,
            tasks: JoinSet::new(),
        }
    }

    /// Build the HTTP client and Discord notifier described by `config`.
    ///
    /// Both share one connection pool.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = build_http_client(config)?;
        let client = YeezySupplyClient::new(
            http.clone(),
            config.api_base_url.clone(),
            config.user_agent.clone(),
        );
        let target = WebhookTarget::parse(&config.webhook)?;
        let notifier = DiscordNotifier::new(http, target, config.site_url.clone());

        Ok(Self::new(
            Arc::new(client),
            Arc::new(notifier),
            config.intervals,
        ))
    }

    /// Spawn a monitor for each product, labelled by its position.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, products: &[ProductId]) {
        for (task, product) in products.iter().enumerate() {
            let monitor = Monitor::new(
                product.clone(),
                task,
                self.client.clone(),
                self.notifier.clone(),
                self.intervals,
            );

            self.tasks.spawn(monitor.run(self.shutdown_tx.subscribe()));
        }

        log::info!("Started {} monitor task(s)", products.len());
    }

    pub fn active_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Handle that stops every task when sent to
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    pub fn shutdown(&self) {
        // send() only fails when every task has already finished
        let _ = self.shutdown_tx.send(());
    }

    /// Wait for every task to finish and return their final states.
    pub async fn wait(&mut self) -> Vec<MonitorState> {
        let mut finished = Vec::with_capacity(self.tasks.len());

        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(state) => {
                    log::debug!("Task {} finished", state.task);
                    finished.push(state);
                }
                Err(e) => log::error!("Monitor task panicked: {}", e),
            }
        }

        finished.sort_by_key(|state| state.task);
        finished
    }
}
