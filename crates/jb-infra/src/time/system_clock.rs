use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jb_core::ports::ClockPort;

/// Wall clock in epoch milliseconds that never goes backwards within the
/// process, even if the system time is stepped back.
#[derive(Debug, Default)]
pub struct SystemClock {
    last_ms: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClockPort for SystemClock {
    fn now_ms(&self) -> i64 {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis() as i64;

        let previous = self.last_ms.fetch_max(wall, Ordering::SeqCst);
        previous.max(wall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_non_decreasing() {
        let clock = SystemClock::new();
        let mut last = clock.now_ms();
        for _ in 0..1_000 {
            let now = clock.now_ms();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_never_reports_earlier_than_seen() {
        let clock = SystemClock::new();
        clock.last_ms.store(i64::MAX - 1, Ordering::SeqCst);
        assert_eq!(clock.now_ms(), i64::MAX - 1);
    }
}
