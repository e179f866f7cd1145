//! Webhook URL decomposition.
//!
//! A Discord webhook URL has the shape `<base>/<id>/<token>`; the id routes the
//! message and the token authenticates it.

use url::Url;

use crate::error::{MonitorError, Result};

#[derive(Clone, PartialEq, Eq)]
pub struct WebhookTarget {
    base: Url,
    id: String,
    token: String,
}

impl WebhookTarget {
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw.trim())
            .map_err(|e| MonitorError::webhook(format!("invalid URL '{}': {}", raw, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(MonitorError::webhook(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }

        let mut segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        if segments.len() < 2 {
            return Err(MonitorError::webhook(
                "URL must end with /<id>/<token>".to_string(),
            ));
        }

        let token = segments.pop().unwrap_or_default().to_string();
        let id = segments.pop().unwrap_or_default().to_string();

        let mut base = url.clone();
        base.set_query(None);
        base.set_fragment(None);
        base.set_path(&segments.join("/"));

        Ok(Self { base, id, token })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// URL messages are posted to
    pub fn execute_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.base.as_str().trim_end_matches('/'),
            self.id,
            self.token
        )
    }

    /// Same URL with the token masked, safe for logs and `config show`
    pub fn redacted(&self) -> String {
        format!(
            "{}/{}/{}",
            self.base.as_str().trim_end_matches('/'),
            self.id,
            "*".repeat(self.token.len().min(8))
        )
    }
}

impl std::fmt::Debug for WebhookTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookTarget")
            .field("url", &self.redacted())
            .finish()
    }
}
