//! Time-scrub animation driver.
//!
//! Advances a cutoff timestamp in fixed steps over a range, reprocessing
//! the cached raw batch and rendering at each step, with a short pause
//! between steps so the animation stays legible and the render pipeline is
//! never saturated. Runs exactly `ceil((end - start) / step)` steps and
//! does not loop.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{OverlayError, OverlayResult};
use crate::models::time::{datetime_from_nanos, nanos_from_datetime, nanos_from_duration};
use crate::overlay::ThermalOverlay;

/// Cooperative cancellation for a running animation.
///
/// Cancelling is not an error: the driver simply stops scheduling further
/// steps. The handle can be cloned into UI callbacks.
#[derive(Debug, Clone, Default)]
pub struct AnimationHandle {
    cancelled: Arc<AtomicBool>,
}

impl AnimationHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the animation after the step currently in flight.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl ThermalOverlay {
    /// Animate the overlay from `start` to `end` (nanoseconds since epoch),
    /// advancing the cutoff by `step` each iteration.
    ///
    /// `on_step` receives `(current_cutoff, step_index, total_steps)` after
    /// each rendered step. A load failure at one step logs and moves on;
    /// the data layer already degrades failures to an empty batch.
    pub async fn animate_over_time(
        &self,
        fire_id: &str,
        start: i64,
        end: i64,
        step: Duration,
        handle: &AnimationHandle,
        mut on_step: impl FnMut(i64, usize, usize) + Send,
    ) -> OverlayResult<()> {
        let step_nanos = nanos_from_duration(step).max(1);
        let span = end.saturating_sub(start).max(0);
        let total_steps = (span as u128).div_ceil(step_nanos as u128) as usize;
        let step_delay = Duration::from_millis(self.config().animation.step_delay_ms);

        for index in 0..total_steps {
            if handle.is_cancelled() {
                log::debug!(
                    "Animation for fire '{}' cancelled at step {}/{}",
                    fire_id,
                    index,
                    total_steps
                );
                break;
            }

            let cutoff = start + (index as i64) * step_nanos;
            if let Err(e) = self.load_thermal_data(fire_id, Some(cutoff), None).await {
                log::warn!(
                    "Animation step {} (cutoff {}) failed for fire '{}': {}",
                    index,
                    datetime_from_nanos(cutoff),
                    fire_id,
                    e
                );
            }

            on_step(cutoff, index, total_steps);

            if index + 1 < total_steps {
                tokio::time::sleep(step_delay).await;
            }
        }

        Ok(())
    }

    /// [`animate_over_time`](Self::animate_over_time) with datetime
    /// endpoints, for callers that scrub in wall-clock terms.
    pub async fn animate_between(
        &self,
        fire_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: Duration,
        handle: &AnimationHandle,
        on_step: impl FnMut(i64, usize, usize) + Send,
    ) -> OverlayResult<()> {
        let start = nanos_from_datetime(start).ok_or_else(|| {
            OverlayError::configuration("animation start outside the nanosecond timestamp range")
        })?;
        let end = nanos_from_datetime(end).ok_or_else(|| {
            OverlayError::configuration("animation end outside the nanosecond timestamp range")
        })?;
        self.animate_over_time(fire_id, start, end, step, handle, on_step)
            .await
    }
}
