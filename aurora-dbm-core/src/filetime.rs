//! Windows FILETIME conversion.
//!
//! `DateAdded` is stored as a FILETIME: the number of 100-nanosecond
//! ticks since 1601-01-01 00:00:00 UTC.

use chrono::{DateTime, Utc};

/// Ticks between 1601-01-01 and the Unix epoch.
const EPOCH_DIFFERENCE_TICKS: i64 = 116_444_736_000_000_000;

const TICKS_PER_SECOND: i64 = 10_000_000;

/// Convert a FILETIME tick count to a UTC timestamp.
///
/// Every `i64` tick count is representable, so this never fails.
pub fn to_datetime(ticks: i64) -> DateTime<Utc> {
    let since_unix = i128::from(ticks) - i128::from(EPOCH_DIFFERENCE_TICKS);
    let secs = since_unix.div_euclid(i128::from(TICKS_PER_SECOND)) as i64;
    let nanos = (since_unix.rem_euclid(i128::from(TICKS_PER_SECOND)) * 100) as u32;
    DateTime::from_timestamp(secs, nanos).unwrap_or_default()
}

/// Convert a UTC timestamp to a FILETIME tick count.
///
/// Precision below 100 ns is truncated. Timestamps outside the FILETIME
/// range saturate.
pub fn from_datetime(time: DateTime<Utc>) -> i64 {
    let since_unix = time.signed_duration_since(DateTime::UNIX_EPOCH);
    let ticks = match since_unix.num_nanoseconds() {
        Some(nanos) => i128::from(nanos / 100),
        None => i128::from(since_unix.num_seconds()) * i128::from(TICKS_PER_SECOND),
    };
    let total = ticks + i128::from(EPOCH_DIFFERENCE_TICKS);
    total.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// The FILETIME for "now".
pub fn now() -> i64 {
    from_datetime(Utc::now())
}
