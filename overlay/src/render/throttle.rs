//! Draw-rate limiting.
//!
//! Replacing a heat layer means tearing down and rebuilding a DOM canvas,
//! so rapid scrubbing or zooming must not redraw on every event. This is a
//! token bucket of size one: the first acquire in any interval wins, the
//! rest are refused with the remaining wait so the caller can schedule a
//! trailing draw instead of dropping the frame.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Outcome of asking for the draw token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquire {
    /// Token taken; draw now.
    Ready,
    /// Token spent; retry after this long.
    Wait(Duration),
}

/// Size-one token bucket.
pub struct RenderThrottle {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl RenderThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    /// Take the token if the interval has elapsed since the last taker,
    /// otherwise report how long until it refills.
    pub fn acquire(&self) -> Acquire {
        let mut last = self.last.lock();
        let now = Instant::now();
        if let Some(prev) = *last {
            let elapsed = now.duration_since(prev);
            if elapsed < self.interval {
                return Acquire::Wait(self.interval - elapsed);
            }
        }
        *last = Some(now);
        Acquire::Ready
    }

    /// Forget the last acquisition so the next caller passes immediately.
    /// Used when the layer was cleared rather than drawn and the token
    /// should not be considered spent.
    pub fn reset(&self) {
        *self.last.lock() = None;
    }
}
