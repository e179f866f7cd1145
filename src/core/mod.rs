// Core business logic module

pub mod client;
pub mod config;
pub mod monitor;
pub mod notifier;
pub mod product;
pub mod supervisor;
pub mod webhook;

// Re-export commonly used items
pub use client::{AvailabilityClient, AvailabilityResult, YeezySupplyClient};
pub use config::{Config, PollIntervals};
pub use monitor::{Monitor, MonitorState, Step};
pub use notifier::{DiscordNotifier, Notifier};
pub use product::{ProductId, ProductMetadata, VariantAvailability, VariantSnapshot, STOCK_CAP};
pub use supervisor::Supervisor;
pub use webhook::WebhookTarget;
