//! Restock notifications.
//!
//! One webhook message per notify-worthy cycle. Delivery is attempted once;
//! failures are logged here and never reach the monitor.

use async_trait::async_trait;
use serde::Serialize;

use super::product::{ProductMetadata, VariantAvailability};
use super::webhook::WebhookTarget;
use crate::error::{MonitorError, Result};

pub const EMBED_COLOR: u32 = 0x0099ff;
pub const WEBHOOK_USERNAME: &str = "YS Monitor";
pub const EMBED_FOOTER: &str = "YS Stock Monitor";

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a restock message. Never fails the caller.
    async fn notify(
        &self,
        task: usize,
        product_id: &str,
        in_stock: &[VariantAvailability],
        metadata: Option<&ProductMetadata>,
    );
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WebhookMessage {
    pub username: String,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    pub url: String,
    pub author: EmbedAuthor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,
    pub fields: Vec<EmbedField>,
    pub timestamp: String,
    pub footer: EmbedFooter,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedAuthor {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
}

/// Build the restock message for a product.
///
/// Without metadata the title falls back to the product id and the price
/// field is left out.
pub fn build_message(
    site_url: &str,
    product_id: &str,
    in_stock: &[VariantAvailability],
    metadata: Option<&ProductMetadata>,
) -> WebhookMessage {
    let site = site_url.trim_end_matches('/');

    let title = match metadata {
        Some(meta) if !meta.color.is_empty() => format!("{} {}", meta.title, meta.color),
        Some(meta) => meta.title.clone(),
        None => product_id.to_string(),
    };

    let mut fields = Vec::with_capacity(in_stock.len() + 1);
    if let Some(meta) = metadata {
        fields.push(EmbedField {
            name: "Price".to_string(),
            value: format!("${}", meta.price),
            inline: false,
        });
    }
    fields.extend(in_stock.iter().map(|variant| EmbedField {
        name: variant.size.clone(),
        value: variant.stock_display(),
        inline: true,
    }));

    let embed = Embed {
        title,
        color: EMBED_COLOR,
        url: format!("{}/product/{}", site, product_id),
        author: EmbedAuthor {
            name: site.to_string(),
            url: site.to_string(),
        },
        thumbnail: metadata
            .and_then(|m| m.image_url.clone())
            .map(|url| EmbedImage { url }),
        fields,
        timestamp: chrono::Utc::now().to_rfc3339(),
        footer: EmbedFooter {
            text: EMBED_FOOTER.to_string(),
        },
    };

    WebhookMessage {
        username: WEBHOOK_USERNAME.to_string(),
        embeds: vec![embed],
    }
}

/// Posts restock embeds to a Discord webhook
#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    http: reqwest::Client,
    target: WebhookTarget,
    site_url: String,
}

impl DiscordNotifier {
    pub fn new(http: reqwest::Client, target: WebhookTarget, site_url: String) -> Self {
        Self {
            http,
            target,
            site_url,
        }
    }

    /// Single delivery attempt; the error is returned so `notify` can log it.
    pub async fn send(&self, message: &WebhookMessage) -> Result<()> {
        let url = self.target.execute_url();
        let resp = self.http.post(&url).json(message).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(MonitorError::webhook(format!(
                "sink returned status {} for {}",
                status.as_u16(),
                self.target.redacted()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify(
        &self,
        task: usize,
        product_id: &str,
        in_stock: &[VariantAvailability],
        metadata: Option<&ProductMetadata>,
    ) {
        let message = build_message(&self.site_url, product_id, in_stock, metadata);

        match self.send(&message).await {
            Ok(()) => log::debug!("Sent Discord notification on task {}", task),
            Err(e) => log::error!("Unable to send Discord notification on task {}: {}", task, e),
        }
    }
}
