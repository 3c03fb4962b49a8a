/// Errors that can occur while querying the metadata backend.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LookupError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Whether retrying the same request may succeed.
    ///
    /// Network failures, timeouts, throttling (429) and server errors (5xx)
    /// are transient. Bad payloads and client errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => {
                e.is_timeout() || e.is_connect() || e.is_request() || e.is_body()
                    || e.status().is_some_and(|s| s.is_server_error() || s.as_u16() == 429)
            }
            Self::Status { status, .. } => *status == 429 || (500..600).contains(status),
            Self::Malformed(_) | Self::Json(_) => false,
        }
    }
}
