//! Request pacing for the TMDB API.

use std::time::Duration;

use tokio::time::Instant;

/// Default minimum spacing between requests (~40 req/s).
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(25);

/// Minimum-interval pacer.
///
/// TMDB allows roughly 40 requests per second. Every request reserves the
/// next free slot, so a burst of scroll-triggered page loads and search
/// keystrokes is spread out instead of tripping HTTP 429.
#[derive(Debug)]
pub struct RateLimiter {
    /// Minimum spacing between two requests.
    min_interval: Duration,
    /// Earliest instant the next request may start.
    next_slot: Option<Instant>,
}

impl RateLimiter {
    /// Creates a pacer with the given minimum spacing.
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: None,
        }
    }

    /// Creates a pacer with the default spacing (25ms).
    pub(crate) const fn default_interval() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }

    /// Waits for the next free slot and reserves the one after it.
    pub async fn wait(&mut self) {
        if let Some(slot) = self.next_slot {
            tokio::time::sleep_until(slot).await;
        }
        self.next_slot = Instant::now().checked_add(self.min_interval);
    }
}
