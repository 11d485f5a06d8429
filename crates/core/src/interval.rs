//! Half-open time ranges
//!
//! Every overlap test in the registry goes through [`TimeRange::overlaps`],
//! so bookings, availability checks and occupancy queries all agree on what
//! "occupied" means.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A half-open range `[start, end)` between two instants.
///
/// The range is not validated on construction; availability checks need to
/// describe empty or reversed ranges in order to reject them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// True when `start < end`
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// True when both ends fall on the same calendar date
    pub fn is_within_single_day(&self) -> bool {
        self.start.date() == self.end.date()
    }

    /// Half-open overlap: touching endpoints do not overlap.
    ///
    /// ```rust
    /// # use chrono::NaiveDate;
    /// # use roombook_core::TimeRange;
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    /// let at = |h| day.and_hms_opt(h, 0, 0).unwrap();
    ///
    /// let morning = TimeRange::new(at(10), at(11));
    /// assert!(morning.overlaps(&TimeRange::new(at(10), at(12))));
    /// assert!(!morning.overlaps(&TimeRange::new(at(11), at(12))));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Calendar date of the start instant
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%H:%M")
        )
    }
}
