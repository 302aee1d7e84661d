use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed {
        limit: u32,
        remaining: u32,
        reset_after: Duration,
    },
    Rejected {
        limit: u32,
        retry_after: Duration,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Per-client request counter. Implementations own their concurrency safety.
#[async_trait]
pub trait RateLimiterPort: Send + Sync {
    /// Record one hit for `client_key` and report whether it fits the quota.
    async fn check(&self, client_key: &str) -> RateLimitDecision;
}
