//! Timestamp sources for new blocks
//!
//! Block hashes cover the creation timestamp, so every block carries the
//! textual form produced by [`format_timestamp`]. [`SystemClock`] is used by
//! default; [`ManualClock`] yields a reproducible sequence, which makes whole
//! chains (and their hashes) reproducible.

use chrono::{Duration, NaiveDateTime, Utc};
use parking_lot::Mutex;

/// `YYYY-MM-DDTHH:MM:SS.ffffff`, always six fractional digits, no zone suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a timestamp produced by [`format_timestamp`].
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
}

/// Source of block creation timestamps.
pub trait Clock: Send + Sync {
    /// Current time, already formatted with [`format_timestamp`].
    fn now(&self) -> String;
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        format_timestamp(Utc::now().naive_utc())
    }
}

/// Clock that starts at a fixed instant and advances by `step` on every read.
#[derive(Debug)]
pub struct ManualClock {
    next: Mutex<NaiveDateTime>,
    step: Duration,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime, step: Duration) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }

    /// The value the next call to [`Clock::now`] will return.
    pub fn peek(&self) -> String {
        format_timestamp(*self.next.lock())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(NaiveDateTime::default(), Duration::seconds(1))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> String {
        let mut next = self.next.lock();
        let current = *next;
        *next = current + self.step;
        format_timestamp(current)
    }
}
