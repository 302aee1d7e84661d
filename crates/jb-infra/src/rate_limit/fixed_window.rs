//! In-memory fixed-window request counter.
//!
//! Each client key gets a window that starts on its first hit and lasts
//! `window`. Counters live in process memory and reset on restart; this is a
//! coarse abuse brake, not a security boundary.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use jb_core::config::RateLimitConfig;
use jb_core::ports::{RateLimitDecision, RateLimiterPort};
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Expired windows are first swept once this many clients are tracked
const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    hits: u32,
}

#[derive(Debug)]
struct Clients {
    windows: HashMap<String, Window>,
    /// Map size that triggers the next sweep
    prune_at: usize,
}

pub struct FixedWindowRateLimiter {
    window: Duration,
    max_requests: u32,
    prune_threshold: usize,
    clients: Mutex<Clients>,
}

impl FixedWindowRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_prune_threshold(config, PRUNE_THRESHOLD)
    }

    fn with_prune_threshold(config: RateLimitConfig, prune_threshold: usize) -> Self {
        Self {
            window: config.window,
            max_requests: config.max_requests,
            prune_threshold,
            clients: Mutex::new(Clients {
                windows: HashMap::new(),
                prune_at: prune_threshold,
            }),
        }
    }

    #[cfg(test)]
    async fn tracked_clients(&self) -> usize {
        self.clients.lock().await.windows.len()
    }
}

#[async_trait]
impl RateLimiterPort for FixedWindowRateLimiter {
    async fn check(&self, client_key: &str) -> RateLimitDecision {
        let now = Instant::now();
        let mut guard = self.clients.lock().await;
        let clients = &mut *guard;

        // Next sweep waits until the surviving set has doubled
        if clients.windows.len() >= clients.prune_at {
            let window = self.window;
            clients
                .windows
                .retain(|_, w| now.duration_since(w.started) < window);
            clients.prune_at = self.prune_threshold.max(clients.windows.len() * 2);
        }

        let entry = clients.windows.entry(client_key.to_string()).or_insert(Window {
            started: now,
            hits: 0,
        });

        if now.duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                hits: 0,
            };
        }

        let reset_after = self.window.saturating_sub(now.duration_since(entry.started));

        if entry.hits >= self.max_requests {
            return RateLimitDecision::Rejected {
                limit: self.max_requests,
                retry_after: reset_after,
            };
        }

        entry.hits += 1;
        RateLimitDecision::Allowed {
            limit: self.max_requests,
            remaining: self.max_requests - entry.hits,
            reset_after,
        }
    }
}
