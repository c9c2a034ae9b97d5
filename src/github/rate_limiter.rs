use std::sync::Mutex;

use chrono::Utc;
use reqwest::header::HeaderMap;
use reqwest::Response;

/// Used when GitHub throttles us without saying for how long.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

const LOW_QUOTA_WARNING: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitSnapshot {
    pub remaining: Option<u32>,
    pub reset_at: Option<u64>,
    pub retry_after: Option<u64>,
}

impl RateLimitSnapshot {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header_u64 = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
        };

        Self {
            remaining: header_u64("x-ratelimit-remaining").map(|v| v.min(u32::MAX as u64) as u32),
            reset_at: header_u64("x-ratelimit-reset"),
            retry_after: header_u64("retry-after"),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Seconds until a retry can succeed, as of the unix timestamp `now`.
    pub fn retry_after_secs(&self, now: u64) -> u64 {
        if let Some(secs) = self.retry_after {
            return secs;
        }
        match self.reset_at {
            Some(reset) if reset > now => reset - now,
            _ => DEFAULT_RETRY_AFTER_SECS,
        }
    }
}

/// Tracks the quota GitHub reports on each response.
///
/// Nothing here sleeps or retries: an exhausted quota is surfaced to the
/// caller as `Error::RateLimited`.
pub struct RateLimiter {
    state: Mutex<RateLimitSnapshot>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RateLimitSnapshot::default()),
        }
    }

    pub fn update_from_response(&self, response: &Response) -> RateLimitSnapshot {
        let snapshot = RateLimitSnapshot::from_headers(response.headers());
        self.record(snapshot);
        snapshot
    }

    /// Keep the latest reported quota. Responses without quota headers are ignored.
    pub fn record(&self, snapshot: RateLimitSnapshot) {
        let Some(remaining) = snapshot.remaining else {
            return;
        };

        tracing::debug!("GitHub quota remaining: {}", remaining);
        if snapshot.is_exhausted() {
            tracing::warn!("GitHub quota exhausted");
        } else if remaining <= LOW_QUOTA_WARNING {
            tracing::warn!("GitHub quota nearly exhausted ({} requests left)", remaining);
        }

        if let Ok(mut state) = self.state.lock() {
            *state = snapshot;
        }
    }

    pub fn remaining(&self) -> Option<u32> {
        self.state.lock().ok().and_then(|s| s.remaining)
    }

    pub fn retry_after_secs(&self, snapshot: &RateLimitSnapshot) -> u64 {
        snapshot.retry_after_secs(Utc::now().timestamp().max(0) as u64)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
