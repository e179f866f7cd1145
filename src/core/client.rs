//! Remote availability client.
//!
//! Two reads per product: the availability endpoint, polled every cycle, and
//! the product endpoint for descriptive metadata, read only when a
//! notification is about to be sent. Retry policy lives in the monitor.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::config::Config;
use super::product::{ProductId, ProductMetadata, VariantAvailability, VariantSnapshot};
use crate::error::{MonitorError, Result};

/// Outcome of one availability read
#[derive(Debug)]
pub enum AvailabilityResult {
    /// `id` is the service's internal product id, used for links and metadata
    Success { id: String, snapshot: VariantSnapshot },
    /// Product exists but stock has not been loaded (404, preview, or a message body)
    NotYetAvailable,
    TransportError(MonitorError),
}

#[async_trait]
pub trait AvailabilityClient: Send + Sync {
    async fn fetch_availability(&self, product: &ProductId) -> AvailabilityResult;

    async fn fetch_metadata(&self, internal_id: &str) -> Result<ProductMetadata>;
}

#[derive(Debug, Deserialize)]
struct AvailabilityBody {
    id: String,
    variation_list: Vec<VariantAvailability>,
}

#[derive(Debug, Deserialize)]
struct ProductBody {
    name: String,
    #[serde(default)]
    view_list: Vec<ProductView>,
    pricing_information: PricingInformation,
    attribute_list: AttributeList,
}

#[derive(Debug, Deserialize)]
struct ProductView {
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PricingInformation {
    standard_price: Value,
}

#[derive(Debug, Deserialize)]
struct AttributeList {
    #[serde(default)]
    color: String,
}

/// Classify a raw availability response.
pub fn parse_availability(status: StatusCode, url: &str, body: &str) -> AvailabilityResult {
    if status == StatusCode::NOT_FOUND {
        return AvailabilityResult::NotYetAvailable;
    }

    if !status.is_success() {
        return AvailabilityResult::TransportError(MonitorError::unexpected_status(
            status.as_u16(),
            url,
        ));
    }

    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return AvailabilityResult::TransportError(e.into()),
    };

    let has_message = value.get("message").is_some_and(|m| !m.is_null());
    let is_preview = value
        .get("availability_status")
        .and_then(Value::as_str)
        .is_some_and(|s| s.eq_ignore_ascii_case("PREVIEW"));

    if has_message || is_preview {
        return AvailabilityResult::NotYetAvailable;
    }

    match serde_json::from_value::<AvailabilityBody>(value) {
        Ok(parsed) => AvailabilityResult::Success {
            id: parsed.id,
            snapshot: VariantSnapshot::new(parsed.variation_list),
        },
        Err(e) => AvailabilityResult::TransportError(MonitorError::invalid_response(format!(
            "availability body from {}: {}",
            url, e
        ))),
    }
}

/// Parse a product body into display metadata.
pub fn parse_metadata(body: &str) -> Result<ProductMetadata> {
    let parsed: ProductBody = serde_json::from_str(body)?;

    let price = match parsed.pricing_information.standard_price {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        other => {
            return Err(MonitorError::invalid_response(format!(
                "unexpected standard_price: {}",
                other
            )))
        }
    };

    Ok(ProductMetadata {
        title: parsed.name,
        image_url: parsed.view_list.into_iter().find_map(|v| v.image_url),
        price,
        color: parsed.attribute_list.color,
    })
}

/// Build the pooled HTTP client shared by every task.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client> {
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()?;

    Ok(http)
}

/// Client for the storefront's JSON API
#[derive(Debug, Clone)]
pub struct YeezySupplyClient {
    http: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl YeezySupplyClient {
    pub fn new(http: reqwest::Client, base_url: String, user_agent: String) -> Self {
        Self {
            http,
            base_url,
            user_agent,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            build_http_client(config)?,
            config.api_base_url.clone(),
            config.user_agent.clone(),
        ))
    }

    fn availability_url(&self, product: &ProductId) -> String {
        format!(
            "{}/products/{}/availability",
            self.base_url.trim_end_matches('/'),
            product
        )
    }

    fn product_url(&self, internal_id: &str) -> String {
        format!(
            "{}/products/{}",
            self.base_url.trim_end_matches('/'),
            internal_id
        )
    }

    async fn get(&self, url: &str) -> Result<(StatusCode, String)> {
        let resp = self
            .http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "max-age=0")
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        Ok((status, body))
    }
}

#[async_trait]
impl AvailabilityClient for YeezySupplyClient {
    async fn fetch_availability(&self, product: &ProductId) -> AvailabilityResult {
        let url = self.availability_url(product);

        match self.get(&url).await {
            Ok((status, body)) => parse_availability(status, &url, &body),
            Err(e) => AvailabilityResult::TransportError(e),
        }
    }

    async fn fetch_metadata(&self, internal_id: &str) -> Result<ProductMetadata> {
        let url = self.product_url(internal_id);
        let (status, body) = self.get(&url).await?;

        if !status.is_success() {
            return Err(MonitorError::unexpected_status(status.as_u16(), url));
        }

        parse_metadata(&body)
    }
}
