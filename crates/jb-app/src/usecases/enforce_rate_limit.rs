use std::sync::Arc;
use std::time::Duration;

use jb_core::ports::{RateLimitDecision, RateLimiterPort};
use tracing::debug;

use crate::error::BlobServiceError;

pub const API_RATE_LIMIT_MESSAGE: &str = "Too many requests, please try again later";
pub const CREATE_RATE_LIMIT_MESSAGE: &str = "Too many pastes created, please try again later";

/// Remaining quota after an allowed request, for response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitQuota {
    pub limit: u32,
    pub remaining: u32,
    pub reset_after: Duration,
}

/// Translate a limiter decision into allowed-with-quota or `RateLimited`.
pub struct EnforceRateLimit {
    limiter: Arc<dyn RateLimiterPort>,
    message: &'static str,
}

impl EnforceRateLimit {
    pub fn from_port(limiter: Arc<dyn RateLimiterPort>, message: &'static str) -> Self {
        Self { limiter, message }
    }

    pub async fn execute(&self, client_key: &str) -> Result<RateLimitQuota, BlobServiceError> {
        match self.limiter.check(client_key).await {
            RateLimitDecision::Allowed {
                limit,
                remaining,
                reset_after,
            } => Ok(RateLimitQuota {
                limit,
                remaining,
                reset_after,
            }),
            RateLimitDecision::Rejected { limit, retry_after } => {
                debug!(client = client_key, ?retry_after, "Rate limit exceeded");
                Err(BlobServiceError::RateLimited {
                    message: self.message.to_string(),
                    limit,
                    retry_after,
                })
            }
        }
    }
}
