//! Date and time replies. Pure formatting over host local time; no I/O.

use chrono::{DateTime, Local};

/// Source of "now". The assistant reads time only through this seam.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Host wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// "आज 05 March 2025 है।": two-digit day, full month name, four-digit year.
pub fn date_reply(now: &DateTime<Local>) -> String {
    format!("आज {} है।", now.format("%d %B %Y"))
}

/// "अभी 03:07 PM बज रहे हैं।" on a 12-hour clock.
pub fn time_reply(now: &DateTime<Local>) -> String {
    format!("अभी {} बज रहे हैं।", now.format("%I:%M %p"))
}
