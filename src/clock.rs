//! Time units and wall-clock time sources
//!
//! Generators never read the clock themselves: callers pass a time source
//! (any `Fn() -> u64`) that yields "now" in the generator's unit. The
//! functions here are the usual choices for that argument.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Granularity of a generator's time segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
}

impl TimeUnit {
    /// Whether a Snowflake layout may use this unit
    #[inline]
    pub const fn is_supported(self) -> bool {
        matches!(self, TimeUnit::Milliseconds | TimeUnit::Seconds)
    }

    /// Convert a Unix timestamp in milliseconds into this unit
    pub const fn convert_millis(self, millis: u64) -> u64 {
        match self {
            TimeUnit::Nanoseconds => millis.saturating_mul(1_000_000),
            TimeUnit::Microseconds => millis.saturating_mul(1_000),
            TimeUnit::Milliseconds => millis,
            TimeUnit::Seconds => millis / 1_000,
            TimeUnit::Minutes => millis / 60_000,
        }
    }

    /// Number of whole units in a duration
    pub fn count(self, duration: Duration) -> u64 {
        let count = match self {
            TimeUnit::Nanoseconds => duration.as_nanos(),
            TimeUnit::Microseconds => duration.as_micros(),
            TimeUnit::Milliseconds => duration.as_millis(),
            TimeUnit::Seconds => u128::from(duration.as_secs()),
            TimeUnit::Minutes => u128::from(duration.as_secs() / 60),
        };
        u64::try_from(count).unwrap_or(u64::MAX)
    }

    /// Interpret a Unix timestamp in this unit as an instant.
    ///
    /// Values beyond chrono's representable range saturate to
    /// [`DateTime::<Utc>::MAX_UTC`].
    pub fn to_datetime(self, value: u64) -> DateTime<Utc> {
        let value = i64::try_from(value).unwrap_or(i64::MAX);
        let instant = match self {
            TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
            TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
            TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
            TimeUnit::Seconds => DateTime::from_timestamp(value, 0),
            TimeUnit::Minutes => value
                .checked_mul(60)
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        };
        instant.unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch
#[inline]
pub fn system_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Current wall-clock time in seconds since the Unix epoch
#[inline]
pub fn system_seconds() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}
