//! Occupancy report rendering

use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;

use roombook_core::{Booking, BookingRegistry, RoomAvailabilityRequest};

/// Snapshot of a day: who holds which room, and the answers to the
/// configured availability checks
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub date: NaiveDate,
    pub occupancy: Vec<Booking>,
    pub checks: Vec<CheckOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub room: String,
    pub window: String,
    pub available: bool,
    pub message: String,
}

impl Report {
    pub fn build(
        registry: &BookingRegistry,
        date: NaiveDate,
        checks: &[RoomAvailabilityRequest],
    ) -> Self {
        let checks = checks
            .iter()
            .map(|request| {
                let availability = registry.check_request(request);
                let window = match request.time_range() {
                    Some(range) => format!(
                        "{}-{}",
                        range.start.format("%H:%M"),
                        range.end.format("%H:%M")
                    ),
                    None => "?".to_string(),
                };
                CheckOutcome {
                    room: request.room.clone(),
                    window,
                    available: availability.is_available(),
                    message: availability.message(),
                }
            })
            .collect();

        Self {
            date,
            occupancy: registry.occupancy_on(date),
            checks,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Room occupancy {}:", self.date.format("%d.%m.%Y"));
        if self.occupancy.is_empty() {
            let _ = writeln!(out, "  (no bookings)");
        }
        for booking in &self.occupancy {
            let _ = writeln!(out, "{}", booking);
        }
        for check in &self.checks {
            let _ = writeln!(out, "\nRoom {} {}: {}", check.room, check.window, check.message);
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
