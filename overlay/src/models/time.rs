//! Nanosecond timestamp conversions.
//!
//! Point timestamps are integer nanoseconds since epoch end to end; chrono
//! only appears at the edges where callers hand in datetimes.

use chrono::{DateTime, TimeZone, Utc};
use std::time::Duration;

/// Convert a UTC datetime to nanoseconds since epoch.
///
/// Returns `None` for datetimes outside the representable i64 range
/// (roughly 1677–2262).
pub fn nanos_from_datetime(dt: DateTime<Utc>) -> Option<i64> {
    dt.timestamp_nanos_opt()
}

/// Convert nanoseconds since epoch to a UTC datetime.
pub fn datetime_from_nanos(nanos: i64) -> DateTime<Utc> {
    Utc.timestamp_nanos(nanos)
}

/// Convert a duration to nanoseconds, saturating at `i64::MAX`.
pub fn nanos_from_duration(duration: Duration) -> i64 {
    i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX)
}
