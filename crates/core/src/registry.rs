//! Booking registry - the authoritative store of room bookings
//!
//! The registry assigns ids, rejects requests that are malformed or collide
//! with an existing booking for the same room, and answers occupancy and
//! availability queries. Every list it returns is a sorted snapshot.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::BookingError;
use crate::interval::TimeRange;
use crate::invariants::{assert_booking_invariants, assert_no_double_booking};
use crate::manifest::{BookingManifest, ManifestLoad};
use crate::models::{Availability, Booking, BookingId, BookingRequest, RoomAvailabilityRequest};

/// Outcome of a booking attempt
pub type BookingResult = std::result::Result<Booking, BookingError>;

/// In-memory registry of room bookings.
///
/// The registry is a plain single-owner value. Hosts that share it between
/// threads must serialize access to it, since `book_room` checks for
/// conflicts and inserts as two steps.
#[derive(Debug)]
pub struct BookingRegistry {
    /// Stored bookings by id
    bookings: BTreeMap<BookingId, Booking>,
    /// Id handed to the next successful booking
    next_id: BookingId,
}

impl BookingRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            bookings: BTreeMap::new(),
            next_id: BookingId::FIRST,
        }
    }

    /// Reserve a room.
    ///
    /// Fails without touching the registry if the range is empty or reversed,
    /// crosses midnight, or overlaps a booking already held for the room.
    pub fn book_room(&mut self, request: BookingRequest) -> BookingResult {
        let range = request.time_range();

        if let Err(reason) = self.validate(&request.room, &range) {
            tracing::debug!(
                room = %request.room,
                range = %range,
                reason = %reason,
                "Booking rejected"
            );
            return Err(reason);
        }

        let id = self.next_id;
        self.next_id = id.next();

        let booking = request.into_booking(id);
        assert_booking_invariants(&booking);
        self.bookings.insert(id, booking.clone());
        assert_no_double_booking(self.bookings.values());

        tracing::info!(
            booking_id = %id,
            room = %booking.room,
            range = %range,
            "Room booked"
        );
        Ok(booking)
    }

    fn validate(&self, room: &str, range: &TimeRange) -> std::result::Result<(), BookingError> {
        if !range.is_valid() {
            return Err(BookingError::EndNotAfterStart);
        }

        if !range.is_within_single_day() {
            return Err(BookingError::SpansMultipleDays);
        }

        if let Some(existing) = self.find_conflict(room, range) {
            return Err(BookingError::Conflict {
                room: room.to_string(),
                existing: Box::new(existing.clone()),
            });
        }

        Ok(())
    }

    /// First booking on `room` overlapping `range`, lowest id first
    fn find_conflict(&self, room: &str, range: &TimeRange) -> Option<&Booking> {
        self.bookings
            .values()
            .find(|b| b.room == room && b.time_range().overlaps(range))
    }

    /// Bookings starting on `date`, ordered by room then start time
    pub fn occupancy_on(&self, date: NaiveDate) -> Vec<Booking> {
        let mut found: Vec<Booking> = self
            .bookings
            .values()
            .filter(|b| b.date() == date)
            .cloned()
            .collect();
        sort_by_room_then_start(&mut found);
        found
    }

    /// Bookings overlapping `[start, end)` in any room, ordered by room then
    /// start time
    pub fn occupancy_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<Booking> {
        let range = TimeRange::new(start, end);
        let mut found: Vec<Booking> = self
            .bookings
            .values()
            .filter(|b| b.time_range().overlaps(&range))
            .cloned()
            .collect();
        sort_by_room_then_start(&mut found);
        found
    }

    /// Check whether `room` is free for `[start, end)`
    pub fn check_availability(
        &self,
        room: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Availability {
        let range = TimeRange::new(start, end);
        if !range.is_valid() {
            return Availability::InvalidTimeRange;
        }

        let availability = match self.find_conflict(room, &range) {
            Some(existing) => Availability::Occupied(existing.clone()),
            None => Availability::Available,
        };

        tracing::debug!(
            room = %room,
            range = %range,
            available = availability.is_available(),
            "Checked availability"
        );
        availability
    }

    /// Check availability for a date plus start/end offsets.
    ///
    /// Offsets that overflow the calendar are treated as an invalid range.
    pub fn check_request(&self, request: &RoomAvailabilityRequest) -> Availability {
        match request.time_range() {
            Some(range) => self.check_availability(&request.room, range.start, range.end),
            None => Availability::InvalidTimeRange,
        }
    }

    /// All bookings for `room`, ordered by start time
    pub fn room_bookings(&self, room: &str) -> Vec<Booking> {
        let mut found: Vec<Booking> = self
            .bookings
            .values()
            .filter(|b| b.room == room)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.start.cmp(&b.start));
        found
    }

    /// Remove a booking. Returns false if no booking has this id.
    pub fn cancel_booking(&mut self, id: BookingId) -> bool {
        match self.bookings.remove(&id) {
            Some(booking) => {
                tracing::info!(booking_id = %id, room = %booking.room, "Booking cancelled");
                true
            }
            None => {
                tracing::debug!(booking_id = %id, "Cancel requested for unknown booking");
                false
            }
        }
    }

    /// All bookings, ordered by start time then room
    pub fn all_bookings(&self) -> Vec<Booking> {
        let mut found: Vec<Booking> = self.bookings.values().cloned().collect();
        found.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.room.cmp(&b.room)));
        found
    }

    /// Drop every booking and restart ids at 1
    pub fn clear(&mut self) {
        let removed = self.bookings.len();
        self.bookings.clear();
        self.next_id = BookingId::FIRST;
        tracing::info!(removed, "Cleared all bookings");
    }

    /// Get a booking by id
    pub fn get(&self, id: BookingId) -> Option<&Booking> {
        self.bookings.get(&id)
    }

    /// Check if a booking exists
    pub fn contains(&self, id: BookingId) -> bool {
        self.bookings.contains_key(&id)
    }

    /// Number of stored bookings
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Rooms holding at least one booking, ascending
    pub fn rooms(&self) -> Vec<String> {
        self.bookings
            .values()
            .map(|b| b.room.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Id the next successful booking will receive
    pub fn next_id(&self) -> BookingId {
        self.next_id
    }

    /// Import bookings from a manifest.
    ///
    /// Each entry goes through `book_room`, so entries that are malformed or
    /// collide with bookings already present (or earlier in the manifest) are
    /// rejected and reported instead of trusted.
    pub fn load_manifest(&mut self, manifest: &BookingManifest) -> ManifestLoad {
        let mut load = ManifestLoad::default();

        for (index, entry) in manifest.bookings.iter().enumerate() {
            match self.book_room(entry.to_request()) {
                Ok(booking) => load.loaded.push(booking),
                Err(reason) => {
                    tracing::warn!(
                        entry = index,
                        room = %entry.room,
                        reason = %reason,
                        "Skipping manifest entry"
                    );
                    load.rejected.push((index, reason));
                }
            }
        }

        tracing::info!(
            loaded = load.loaded.len(),
            rejected = load.rejected.len(),
            "Loaded booking manifest"
        );
        load
    }
}

impl Default for BookingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_by_room_then_start(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| a.room.cmp(&b.room).then_with(|| a.start.cmp(&b.start)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::BookingEntry;
    use chrono::{NaiveTime, TimeDelta};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        day().and_hms_opt(hour, min, 0).unwrap()
    }

    fn request(room: &str, start: u32, end: u32) -> BookingRequest {
        BookingRequest::new(room, at(start, 0), at(end, 0), "Event", "Organizer")
    }

    #[test]
    fn test_book_room_assigns_ids_from_one() {
        let mut registry = BookingRegistry::new();
        let first = registry.book_room(request("101", 10, 12)).unwrap();
        let second = registry.book_room(request("102", 11, 13)).unwrap();

        assert_eq!(first.id, BookingId(1));
        assert_eq!(second.id, BookingId(2));
        assert_eq!(registry.next_id(), BookingId(3));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_booking_keeps_request_fields() {
        let mut registry = BookingRegistry::new();
        let booking = registry
            .book_room(
                BookingRequest::new("101", at(10, 0), at(12, 0), "Lecture", "Ivanov")
                    .with_description("Linear algebra"),
            )
            .unwrap();

        assert_eq!(booking.room, "101");
        assert_eq!(booking.event_name, "Lecture");
        assert_eq!(booking.organizer, "Ivanov");
        assert_eq!(booking.description, "Linear algebra");
        assert_eq!(registry.get(booking.id), Some(&booking));
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let mut registry = BookingRegistry::new();
        let booking = registry.book_room(request("101", 10, 11)).unwrap();
        assert_eq!(booking.description, "");
    }

    #[test]
    fn test_reversed_range_rejected() {
        let mut registry = BookingRegistry::new();
        let err = registry.book_room(request("101", 12, 10)).unwrap_err();
        assert_eq!(err, BookingError::EndNotAfterStart);
        assert_eq!(err.to_string(), "end time must be after start time");
        assert!(registry.is_empty());
        assert_eq!(registry.next_id(), BookingId(1));
    }

    #[test]
    fn test_empty_range_rejected() {
        let mut registry = BookingRegistry::new();
        let err = registry.book_room(request("101", 10, 10)).unwrap_err();
        assert_eq!(err, BookingError::EndNotAfterStart);
    }

    #[test]
    fn test_cross_midnight_rejected() {
        let mut registry = BookingRegistry::new();
        let next_day = NaiveDate::from_ymd_opt(2024, 1, 16)
            .unwrap()
            .and_hms_opt(1, 0, 0)
            .unwrap();
        let err = registry
            .book_room(BookingRequest::new("101", at(23, 0), next_day, "Party", "Host"))
            .unwrap_err();
        assert_eq!(err, BookingError::SpansMultipleDays);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_conflict_rejected_and_state_unchanged() {
        let mut registry = BookingRegistry::new();
        let existing = registry.book_room(request("101", 10, 12)).unwrap();

        let err = registry.book_room(request("101", 11, 13)).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(err.conflicting_booking(), Some(&existing));
        assert_eq!(err.to_string(), "room 101 is already booked from 10:00 to 12:00");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.next_id(), BookingId(2));
    }

    #[test]
    fn test_touching_bookings_allowed() {
        let mut registry = BookingRegistry::new();
        assert!(registry.book_room(request("101", 10, 11)).is_ok());
        assert!(registry.book_room(request("101", 11, 12)).is_ok());
        assert!(registry.book_room(request("101", 9, 10)).is_ok());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_same_range_other_room_allowed() {
        let mut registry = BookingRegistry::new();
        assert!(registry.book_room(request("101", 10, 12)).is_ok());
        assert!(registry.book_room(request("102", 10, 12)).is_ok());
    }

    #[test]
    fn test_occupancy_on_date_ordered_by_room_then_start() {
        let mut registry = BookingRegistry::new();
        registry.book_room(request("102", 9, 10)).unwrap();
        registry.book_room(request("101", 14, 15)).unwrap();
        registry.book_room(request("101", 8, 9)).unwrap();
        let other_day = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        registry
            .book_room(BookingRequest::on_date(
                "100",
                other_day,
                NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                "Other day",
                "Someone",
            ))
            .unwrap();

        let occupancy = registry.occupancy_on(day());
        let summary: Vec<(&str, NaiveDateTime)> = occupancy
            .iter()
            .map(|b| (b.room.as_str(), b.start))
            .collect();
        assert_eq!(
            summary,
            vec![("101", at(8, 0)), ("101", at(14, 0)), ("102", at(9, 0))]
        );
        assert!(registry
            .occupancy_on(NaiveDate::from_ymd_opt(2024, 1, 17).unwrap())
            .is_empty());
    }

    #[test]
    fn test_occupancy_between_uses_half_open_overlap() {
        let mut registry = BookingRegistry::new();
        registry.book_room(request("102", 10, 11)).unwrap();
        registry.book_room(request("101", 11, 12)).unwrap();
        registry.book_room(request("103", 12, 13)).unwrap();

        let found = registry.occupancy_between(at(10, 30), at(12, 0));
        let rooms: Vec<&str> = found.iter().map(|b| b.room.as_str()).collect();
        assert_eq!(rooms, vec!["101", "102"]);
    }

    #[test]
    fn test_check_availability() {
        let mut registry = BookingRegistry::new();
        let existing = registry.book_room(request("101", 10, 12)).unwrap();

        let occupied = registry.check_availability("101", at(11, 0), at(13, 0));
        assert_eq!(occupied, Availability::Occupied(existing));

        assert!(registry
            .check_availability("101", at(12, 0), at(13, 0))
            .is_available());
        assert!(registry
            .check_availability("102", at(11, 0), at(13, 0))
            .is_available());
        assert_eq!(
            registry.check_availability("101", at(13, 0), at(12, 0)),
            Availability::InvalidTimeRange
        );
    }

    #[test]
    fn test_check_request_delegates_to_instants() {
        let mut registry = BookingRegistry::new();
        registry.book_room(request("102", 11, 13)).unwrap();

        let free = RoomAvailabilityRequest::new("102", day(), TimeDelta::hours(14), TimeDelta::hours(15));
        assert!(registry.check_request(&free).is_available());

        let busy = RoomAvailabilityRequest::new("102", day(), TimeDelta::hours(12), TimeDelta::hours(14));
        assert!(registry.check_request(&busy).is_occupied());

        let reversed = RoomAvailabilityRequest::new("102", day(), TimeDelta::hours(15), TimeDelta::hours(14));
        assert_eq!(registry.check_request(&reversed), Availability::InvalidTimeRange);
    }

    #[test]
    fn test_check_request_with_overflowing_offset_is_invalid() {
        let mut registry = BookingRegistry::new();
        registry.book_room(request("101", 10, 12)).unwrap();

        let overflow = RoomAvailabilityRequest::new("101", day(), TimeDelta::hours(14), TimeDelta::MAX);
        assert_eq!(registry.check_request(&overflow), Availability::InvalidTimeRange);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_check_availability_empty_range_is_invalid() {
        let mut registry = BookingRegistry::new();
        registry.book_room(request("101", 10, 12)).unwrap();

        assert_eq!(
            registry.check_availability("101", at(11, 0), at(11, 0)),
            Availability::InvalidTimeRange
        );
        assert_eq!(
            registry.check_availability("102", at(9, 0), at(9, 0)),
            Availability::InvalidTimeRange
        );
    }

    #[test]
    fn test_room_bookings_ordered_by_start() {
        let mut registry = BookingRegistry::new();
        registry.book_room(request("101", 15, 16)).unwrap();
        registry.book_room(request("102", 9, 10)).unwrap();
        registry.book_room(request("101", 8, 9)).unwrap();

        let starts: Vec<NaiveDateTime> = registry.room_bookings("101").iter().map(|b| b.start).collect();
        assert_eq!(starts, vec![at(8, 0), at(15, 0)]);
        assert!(registry.room_bookings("999").is_empty());
    }

    #[test]
    fn test_cancel_booking() {
        let mut registry = BookingRegistry::new();
        let booking = registry.book_room(request("101", 10, 11)).unwrap();

        assert!(registry.cancel_booking(booking.id));
        assert!(!registry.contains(booking.id));
        assert!(!registry.cancel_booking(booking.id));
        assert!(!registry.cancel_booking(BookingId(42)));
    }

    #[test]
    fn test_cancel_frees_slot_without_reusing_id() {
        let mut registry = BookingRegistry::new();
        let first = registry.book_room(request("101", 10, 11)).unwrap();
        registry.cancel_booking(first.id);

        let again = registry.book_room(request("101", 10, 11)).unwrap();
        assert_eq!(again.id, BookingId(2));
    }

    #[test]
    fn test_all_bookings_ordered_by_start_then_room() {
        let mut registry = BookingRegistry::new();
        registry.book_room(request("102", 10, 11)).unwrap();
        registry.book_room(request("101", 12, 13)).unwrap();
        registry.book_room(request("101", 10, 11)).unwrap();

        let all = registry.all_bookings();
        let summary: Vec<(&str, NaiveDateTime)> =
            all.iter().map(|b| (b.room.as_str(), b.start)).collect();
        assert_eq!(
            summary,
            vec![("101", at(10, 0)), ("102", at(10, 0)), ("101", at(12, 0))]
        );
    }

    #[test]
    fn test_clear_resets_ids() {
        let mut registry = BookingRegistry::new();
        registry.book_room(request("101", 10, 11)).unwrap();
        registry.book_room(request("102", 10, 11)).unwrap();

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.all_bookings().is_empty());

        let booking = registry.book_room(request("101", 10, 11)).unwrap();
        assert_eq!(booking.id, BookingId(1));
    }

    #[test]
    fn test_rooms_are_distinct_and_sorted() {
        let mut registry = BookingRegistry::new();
        registry.book_room(request("201", 10, 11)).unwrap();
        registry.book_room(request("101", 10, 11)).unwrap();
        registry.book_room(request("201", 12, 13)).unwrap();

        assert_eq!(registry.rooms(), vec!["101".to_string(), "201".to_string()]);
    }

    #[test]
    fn test_load_manifest_revalidates_entries() {
        let mut registry = BookingRegistry::new();
        registry.book_room(request("101", 10, 12)).unwrap();

        let entry = |room: &str, start: u32, end: u32| BookingEntry {
            room: room.to_string(),
            start: at(start, 0),
            end: at(end, 0),
            event: "Imported".to_string(),
            organizer: "Loader".to_string(),
            description: None,
        };
        let manifest = BookingManifest {
            bookings: vec![
                entry("101", 11, 12),
                entry("102", 10, 12),
                entry("102", 11, 13),
                entry("103", 14, 13),
            ],
        };

        let load = registry.load_manifest(&manifest);
        assert!(!load.is_clean());
        assert_eq!(load.loaded.len(), 1);
        assert_eq!(load.loaded[0].room, "102");
        let rejected: Vec<usize> = load.rejected.iter().map(|(index, _)| *index).collect();
        assert_eq!(rejected, vec![0, 2, 3]);
        assert_eq!(load.rejected[2].1, BookingError::EndNotAfterStart);
        assert_eq!(registry.len(), 2);
    }
}
