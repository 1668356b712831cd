//! Date-range overlap rule and the availability filter built on it.
//!
//! Both bounds are compared inclusively, so a stay ending on day N blocks a new
//! check-in on day N. Only the embedded reservations decide availability; the
//! room's own `availability` flag is advisory and never read here.

use chrono::NaiveDate;
use hotelrooms_store::api::{Reservation, Room};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

impl From<&Reservation> for DateRange {
    fn from(reservation: &Reservation) -> Self {
        Self::new(reservation.check_in, reservation.check_out)
    }
}

pub fn overlaps(existing: DateRange, candidate: DateRange) -> bool {
    existing.start <= candidate.end && existing.end >= candidate.start
}

pub fn is_room_available(room: &Room, candidate: DateRange) -> bool {
    !room
        .details
        .reservations
        .iter()
        .any(|reservation| overlaps(reservation.into(), candidate))
}

/// Rooms free for the whole `[start, end]` range, in the order they were given
pub fn find_available(rooms: &[Room], start: NaiveDate, end: NaiveDate) -> Vec<Room> {
    let candidate = DateRange::new(start, end);
    rooms
        .iter()
        .filter(|room| is_room_available(room, candidate))
        .cloned()
        .collect()
}
