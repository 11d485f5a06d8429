//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible registry states during
//! development. These checks are compiled out in release builds.

use crate::models::Booking;

/// Validate that a single booking is well formed
pub fn assert_booking_invariants(booking: &Booking) {
    debug_assert!(
        booking.start < booking.end,
        "Booking {} ends at {} which is not after its start {}",
        booking.id,
        booking.end,
        booking.start
    );

    debug_assert!(
        booking.start.date() == booking.end.date(),
        "Booking {} crosses midnight ({} to {})",
        booking.id,
        booking.start,
        booking.end
    );
}

/// Validate that no two bookings for the same room overlap
pub fn assert_no_double_booking<'a, I>(bookings: I)
where
    I: IntoIterator<Item = &'a Booking>,
{
    if !cfg!(debug_assertions) {
        return;
    }

    let mut sorted: Vec<&Booking> = bookings.into_iter().collect();
    sorted.sort_by(|a, b| a.room.cmp(&b.room).then(a.start.cmp(&b.start)));

    for pair in sorted.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        debug_assert!(
            a.room != b.room || !a.time_range().overlaps(&b.time_range()),
            "Room {} is double booked by {} and {}",
            a.room,
            a.id,
            b.id
        );
    }
}
