//! Built-in demo bookings

use chrono::{NaiveDate, NaiveTime};

use roombook_core::{BookingError, BookingRegistry, BookingRequest};

fn hm(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
}

/// Seed the two demo bookings on 2024-01-15
pub fn seed(registry: &mut BookingRegistry) -> Result<(), BookingError> {
    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default();

    registry.book_room(BookingRequest::on_date(
        "101",
        date,
        hm(10),
        hm(12),
        "Mathematics lecture",
        "Ivanov I.I.",
    ))?;

    registry.book_room(BookingRequest::on_date(
        "102",
        date,
        hm(11),
        hm(13),
        "Programming seminar",
        "Petrov P.P.",
    ))?;

    Ok(())
}
