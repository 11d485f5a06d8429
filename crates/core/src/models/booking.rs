//! Booking model

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::interval::TimeRange;

/// Registry-assigned booking identifier.
///
/// Ids are handed out in increasing order starting at 1 and are never reused
/// while the registry lives, even after the booking is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

impl BookingId {
    pub const FIRST: BookingId = BookingId(1);

    pub fn value(&self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> BookingId {
        BookingId(self.0 + 1)
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A reserved interval for one room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub room: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub event_name: String,
    pub organizer: String,
    #[serde(default)]
    pub description: String,
}

impl Booking {
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }

    /// Calendar date the booking starts on
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}-{} - {} ({})",
            self.room,
            self.start.format("%H:%M"),
            self.end.format("%H:%M"),
            self.event_name,
            self.organizer
        )
    }
}

/// Everything needed to ask the registry for a booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub room: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub event_name: String,
    pub organizer: String,
    pub description: String,
}

impl BookingRequest {
    pub fn new(
        room: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        event_name: impl Into<String>,
        organizer: impl Into<String>,
    ) -> Self {
        Self {
            room: room.into(),
            start,
            end,
            event_name: event_name.into(),
            organizer: organizer.into(),
            description: String::new(),
        }
    }

    /// Request a booking by calendar date and two times of day
    pub fn on_date(
        room: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        event_name: impl Into<String>,
        organizer: impl Into<String>,
    ) -> Self {
        Self::new(
            room,
            date.and_time(start),
            date.and_time(end),
            event_name,
            organizer,
        )
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }

    pub(crate) fn into_booking(self, id: BookingId) -> Booking {
        Booking {
            id,
            room: self.room,
            start: self.start,
            end: self.end,
            event_name: self.event_name,
            organizer: self.organizer,
            description: self.description,
        }
    }
}
