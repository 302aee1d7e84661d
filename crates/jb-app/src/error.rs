use std::time::Duration;
use thiserror::Error;

/// Outcome taxonomy of the blob service.
///
/// Messages of every variant except `Internal` are safe to show to clients.
#[derive(Debug, Error)]
pub enum BlobServiceError {
    /// Malformed or missing input; the client must fix and resubmit
    #[error("{0}")]
    BadRequest(String),

    /// Bot verification failed
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    RateLimited {
        message: String,
        limit: u32,
        retry_after: Duration,
    },

    /// Store or unexpected failure. `public` is the opaque client message,
    /// `detail` stays server-side.
    #[error("{public}: {detail}")]
    Internal {
        public: &'static str,
        detail: String,
    },
}

impl BlobServiceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(public: &'static str, detail: impl ToString) -> Self {
        Self::Internal {
            public,
            detail: detail.to_string(),
        }
    }

    /// Text that may be sent to the client
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal { public, .. } => public.to_string(),
            other => other.to_string(),
        }
    }
}
