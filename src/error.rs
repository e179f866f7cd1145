use thiserror::Error;

/// Custom error type for the stock monitor
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Webhook error: {0}")]
    Webhook(String),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the stock monitor
pub type Result<T> = std::result::Result<T, MonitorError>;

impl MonitorError {
    /// Create a webhook error
    pub fn webhook<S: Into<String>>(msg: S) -> Self {
        MonitorError::Webhook(msg.into())
    }

    /// Create an invalid response error
    pub fn invalid_response<S: Into<String>>(msg: S) -> Self {
        MonitorError::InvalidResponse(msg.into())
    }

    pub fn unexpected_status<S: Into<String>>(status: u16, url: S) -> Self {
        MonitorError::UnexpectedStatus {
            status,
            url: url.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        MonitorError::Other(msg.into())
    }
}
