//! Time utilities with a clock abstraction for testability.

use chrono::{TimeZone, Utc};

/// Clock trait for dependency injection and testing.
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in milliseconds.
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time).
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        epoch_millis()
    }
}

/// Fixed clock for tests, always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Current Unix timestamp in milliseconds (UTC).
pub fn epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix millisecond timestamp to an RFC 3339 string (UTC).
pub fn millis_to_rfc3339(timestamp_millis: i64) -> String {
    match Utc.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => dt.to_rfc3339(),
        None => format!("invalid timestamp {timestamp_millis}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_returns_positive_timestamp() {
        let clock = SystemClock;

        assert!(clock.now_millis() > 0);
    }

    #[test]
    fn system_clock_is_monotonic_enough() {
        let clock = SystemClock;

        let first = clock.now_millis();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = clock.now_millis();

        assert!(second >= first);
    }

    #[test]
    fn fixed_clock_returns_fixed_timestamp() {
        let clock = FixedClock::new(1234567890123);

        assert_eq!(clock.now_millis(), 1234567890123);
        assert_eq!(clock.now_millis(), 1234567890123);
    }

    #[test]
    fn millis_convert_to_rfc3339() {
        // 2023-01-01 00:00:00 UTC
        let formatted = millis_to_rfc3339(1672531200000);

        assert!(formatted.starts_with("2023-01-01T00:00:00"));
        assert!(formatted.contains("+00:00"));
    }

    #[test]
    fn millis_with_fraction_convert_to_rfc3339() {
        let formatted = millis_to_rfc3339(1672531200123);

        assert!(formatted.starts_with("2023-01-01T00:00:00.123"));
    }
}
