use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Per-email fixed-window attempt counter.
///
/// `check()` never increments; callers decide what counts as an attempt and
/// call `record()` for it (failed logins, issued reset requests).
pub struct AttemptLimiter {
    /// normalized email -> (count, window_start)
    entries: DashMap<String, (u32, Instant)>,
    max_attempts: u32,
    window: Duration,
}

impl AttemptLimiter {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_attempts,
            window,
        }
    }

    /// 5 failed logins per 15 minutes.
    pub fn login() -> Self {
        Self::new(5, Duration::from_secs(15 * 60))
    }

    /// 3 reset requests per 15 minutes.
    pub fn reset_requests() -> Self {
        Self::new(3, Duration::from_secs(15 * 60))
    }

    /// Ok, or Err with the seconds left in the current window.
    pub fn check(&self, email: &str) -> Result<(), u64> {
        let now = Instant::now();

        let Some(entry) = self.entries.get(&email.to_lowercase()) else {
            return Ok(());
        };
        let (count, start) = entry.value();

        if now.duration_since(*start) > self.window {
            return Ok(());
        }

        if *count >= self.max_attempts {
            let elapsed = now.duration_since(*start).as_secs();
            return Err(self.window.as_secs().saturating_sub(elapsed));
        }

        Ok(())
    }

    pub fn record(&self, email: &str) {
        let now = Instant::now();

        let mut entry = self.entries.entry(email.to_lowercase()).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > self.window {
            *count = 1;
            *start = now;
        } else {
            *count += 1;
        }
    }

    /// Remove entries whose window started more than `max_age` ago.
    pub fn cleanup(&self, max_age: Duration) {
        let now = Instant::now();
        self.entries.retain(|_, (_, start)| now.duration_since(*start) < max_age);
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_after_max_attempts() {
        let limiter = AttemptLimiter::new(2, Duration::from_secs(60));
        assert!(limiter.check("a@test.com").is_ok());
        limiter.record("a@test.com");
        assert!(limiter.check("a@test.com").is_ok());
        limiter.record("A@test.com");

        let retry_after = limiter.check("a@test.com").unwrap_err();
        assert!(retry_after <= 60);
        assert!(limiter.check("b@test.com").is_ok());
    }

    #[test]
    fn window_expiry_resets_count() {
        let limiter = AttemptLimiter::new(1, Duration::from_millis(10));
        limiter.record("a@test.com");
        assert!(limiter.check("a@test.com").is_err());
        std::thread::sleep(Duration::from_millis(20));
        assert!(limiter.check("a@test.com").is_ok());
    }

    #[test]
    fn cleanup_drops_old_entries() {
        let limiter = AttemptLimiter::new(1, Duration::from_secs(60));
        limiter.record("a@test.com");
        limiter.cleanup(Duration::ZERO);
        assert!(limiter.check("a@test.com").is_ok());
    }
}
