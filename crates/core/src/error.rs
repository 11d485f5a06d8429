//! Error types for the booking core

use thiserror::Error;

use crate::models::Booking;

/// Why a booking request was turned down.
///
/// These are ordinary outcomes of `BookingRegistry::book_room`, returned as
/// values. The registry is left untouched whenever one is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("end time must be after start time")]
    EndNotAfterStart,

    #[error("booking must be within a single day")]
    SpansMultipleDays,

    #[error(
        "room {room} is already booked from {} to {}",
        .existing.start.format("%H:%M"),
        .existing.end.format("%H:%M")
    )]
    Conflict { room: String, existing: Box<Booking> },
}

impl BookingError {
    /// Start/end ordering or single-day rule violated
    pub fn is_invalid_interval(&self) -> bool {
        matches!(
            self,
            BookingError::EndNotAfterStart | BookingError::SpansMultipleDays
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, BookingError::Conflict { .. })
    }

    /// The booking that blocked the request, if any
    pub fn conflicting_booking(&self) -> Option<&Booking> {
        match self {
            BookingError::Conflict { existing, .. } => Some(existing),
            _ => None,
        }
    }
}

/// Failures outside the booking rules: reading and parsing external input.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
