//! Fixed-window request counter
//!
//! Twelve Data's free tier allows a fixed number of calls per minute. The
//! window is anchored at the first call after a rollover and resets wholesale,
//! so bursts straddling a boundary can reach twice the limit in a short span.

use super::QuoteError;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Default provider quota per window
pub const DEFAULT_REQUEST_LIMIT: u32 = 8;

/// Default window length
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Whether the current window still has quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimiterState {
    /// Requests remaining in the window
    Open,
    /// Quota used up until the window rolls over
    Exhausted,
}

/// Counter state for one window
#[derive(Debug, Clone)]
pub struct RateWindow {
    /// Requests admitted in the current window
    pub request_count: u32,
    /// When the current window started
    pub window_start: Instant,
}

impl RateWindow {
    fn new(now: Instant) -> Self {
        Self {
            request_count: 0,
            window_start: now,
        }
    }

    fn roll_over(&mut self, now: Instant, window: Duration) {
        if now.saturating_duration_since(self.window_start) >= window {
            self.request_count = 0;
            self.window_start = now;
        }
    }
}

/// Mutex-guarded fixed-window limiter
#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    state: Mutex<RateWindow>,
}

impl RateLimiter {
    /// Create a limiter admitting `limit` requests per `window`
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            state: Mutex::new(RateWindow::new(Instant::now())),
        }
    }

    /// Configured quota
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Configured window length
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Consume one unit of quota, or fail with `RateLimitExceeded`
    pub fn try_acquire(&self) -> Result<(), QuoteError> {
        self.try_acquire_at(Instant::now())
    }

    /// Check-and-increment at an explicit instant
    pub fn try_acquire_at(&self, now: Instant) -> Result<(), QuoteError> {
        let mut window = self.lock();
        window.roll_over(now, self.window);

        if window.request_count >= self.limit {
            let elapsed = now.saturating_duration_since(window.window_start);
            return Err(QuoteError::RateLimitExceeded {
                retry_after: self.window.saturating_sub(elapsed),
            });
        }

        window.request_count += 1;
        Ok(())
    }

    /// Current state, accounting for a window that has already expired
    pub fn state(&self) -> LimiterState {
        self.state_at(Instant::now())
    }

    /// State at an explicit instant
    pub fn state_at(&self, now: Instant) -> LimiterState {
        if self.remaining_at(now) == 0 {
            LimiterState::Exhausted
        } else {
            LimiterState::Open
        }
    }

    /// Requests left in the current window
    pub fn remaining(&self) -> u32 {
        self.remaining_at(Instant::now())
    }

    /// Requests left at an explicit instant; an expired window counts as full.
    /// Only `try_acquire_at` moves the window.
    pub fn remaining_at(&self, now: Instant) -> u32 {
        let window = self.lock();
        if now.saturating_duration_since(window.window_start) >= self.window {
            return self.limit;
        }
        self.limit.saturating_sub(window.request_count)
    }

    /// Copy of the current window
    pub fn snapshot(&self) -> RateWindow {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RateWindow> {
        // Counter stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_LIMIT, DEFAULT_WINDOW)
    }
}
