//! Clock abstraction for snapshot naming
//!
//! Snapshot folders are named after the local time at minute resolution, so
//! tests need to control "now" to produce distinct or identical minutes.

use std::sync::Mutex;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Format used for snapshot folder names (`yyyyMMddHHmm`, 24-hour clock)
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

/// Source of the current local time
pub trait Clock: Send + Sync {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;
}

/// Real local-time clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Settable clock for tests and dry runs
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    /// Create a clock frozen at `now`
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Jump to a specific time
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Format a time as a snapshot folder name
pub fn snapshot_name(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a snapshot folder name back into a time
///
/// Returns `None` for folders that weren't named by GhostSaver.
pub fn parse_snapshot_name(name: &str) -> Option<NaiveDateTime> {
    if name.len() != 12 || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year: i32 = name[0..4].parse().ok()?;
    let month: u32 = name[4..6].parse().ok()?;
    let day: u32 = name[6..8].parse().ok()?;
    let hour: u32 = name[8..10].parse().ok()?;
    let minute: u32 = name[10..12].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}
