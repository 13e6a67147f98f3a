//! Periodic session saving
//!
//! The host owns the timer; it calls [`DesktopEngine::tick`](crate::DesktopEngine::tick)
//! whenever convenient and the schedule decides whether a save is due. A
//! failed save still counts as an attempt: the next one waits a full interval.

use chrono::{DateTime, Duration, Utc};

/// Fixed-interval save schedule
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Autosave {
    interval: Duration,
    last_save: DateTime<Utc>,
}

impl Autosave {
    /// Create a schedule whose first save is due one interval after `start`
    pub fn new(interval: Duration, start: DateTime<Utc>) -> Self {
        Self {
            interval,
            last_save: start,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time of the last save attempt
    pub fn last_save(&self) -> DateTime<Utc> {
        self.last_save
    }

    /// Check if a save is due at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now - self.last_save >= self.interval
    }

    /// Record a save attempt at `now`
    pub fn mark_saved(&mut self, now: DateTime<Utc>) {
        self.last_save = now;
    }
}
