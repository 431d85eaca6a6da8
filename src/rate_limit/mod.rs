use actix_web::HttpResponse;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Requests allowed per key per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 30;

/// Window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// A key's current window: when it opened and how many requests it has seen.
#[derive(Debug)]
struct WindowSlot {
    window_start: Instant,
    count: u32,
}

/// In-process fixed-window rate limiter keyed by `action:identity`.
///
/// Windows reset lazily on the next access after they lapse; there is no
/// background sweeper. State is per-process — a multi-instance deployment
/// would need the same keys and thresholds in a shared counter store.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    slots: Mutex<HashMap<String, WindowSlot>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Count a request against `key`. Returns false when the key has
    /// exhausted its window.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    /// Clock-injected variant of [`check`](Self::check) so tests can step
    /// time without sleeping.
    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());

        let slot = slots.entry(key.to_string()).or_insert(WindowSlot {
            window_start: now,
            count: 0,
        });

        if now.duration_since(slot.window_start) >= self.window {
            slot.window_start = now;
            slot.count = 0;
        }

        if slot.count >= self.max_requests {
            return false;
        }

        slot.count += 1;
        true
    }
}

/// Compose the canonical `action:identity` key, e.g. `offers:create:<uuid>`.
pub fn key(action: &str, user_id: Uuid) -> String {
    format!("{action}:{user_id}")
}

/// Handler-side guard: 429 with a JSON body when the caller is over budget.
pub fn enforce(limiter: &RateLimiter, action: &str, user_id: Uuid) -> Result<(), HttpResponse> {
    if limiter.check(&key(action, user_id)) {
        Ok(())
    } else {
        Err(HttpResponse::TooManyRequests().json(serde_json::json!({
            "error": "Rate limit exceeded, try again later",
        })))
    }
}
