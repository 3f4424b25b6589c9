use thiserror::Error;

/// Failure talking to the map backend or the path recorder
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend is not configured; set the URL and key in Settings")]
    NotConfigured,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} not found")]
    NotFound(String),
}

impl BackendError {
    /// Whether retrying the same call later could succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            BackendError::Request(_) => true,
            BackendError::Status { status, .. } => *status >= 500 || *status == 429,
            BackendError::NotConfigured | BackendError::Decode { .. } | BackendError::NotFound(_) => false,
        }
    }
}
