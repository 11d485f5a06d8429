//! Availability queries and their outcomes

use chrono::{NaiveDate, NaiveTime, TimeDelta};

use super::Booking;
use crate::interval::TimeRange;

/// Ask whether a room is free on a date between two offsets from midnight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomAvailabilityRequest {
    pub room: String,
    pub date: NaiveDate,
    /// Offset of the start from midnight of `date`
    pub start: TimeDelta,
    /// Offset of the end from midnight of `date`
    pub end: TimeDelta,
}

impl RoomAvailabilityRequest {
    pub fn new(room: impl Into<String>, date: NaiveDate, start: TimeDelta, end: TimeDelta) -> Self {
        Self {
            room: room.into(),
            date,
            start,
            end,
        }
    }

    /// Build a request from two wall-clock times on `date`
    pub fn between(room: impl Into<String>, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self::new(
            room,
            date,
            start - NaiveTime::MIN,
            end - NaiveTime::MIN,
        )
    }

    /// Absolute instants: midnight of `date` plus each offset.
    ///
    /// Returns `None` if either offset lands outside the representable
    /// date range.
    pub fn time_range(&self) -> Option<TimeRange> {
        let midnight = self.date.and_time(NaiveTime::MIN);
        let start = midnight.checked_add_signed(self.start)?;
        let end = midnight.checked_add_signed(self.end)?;
        Some(TimeRange::new(start, end))
    }
}

/// Outcome of an availability check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Nothing on the room overlaps the requested range
    Available,
    /// An existing booking overlaps the requested range
    Occupied(Booking),
    /// The requested range does not end after it starts
    InvalidTimeRange,
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }

    pub fn is_occupied(&self) -> bool {
        !self.is_available()
    }

    pub fn conflicting_booking(&self) -> Option<&Booking> {
        match self {
            Availability::Occupied(booking) => Some(booking),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Availability::Available => "room is available".to_string(),
            Availability::Occupied(booking) => format!(
                "room is occupied: {} ({})",
                booking.event_name, booking.organizer
            ),
            Availability::InvalidTimeRange => "invalid booking time range".to_string(),
        }
    }
}
