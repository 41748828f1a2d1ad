// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory lookups over already-loaded records.
//!
//! These back the list filters of the API layer. None of them touch storage.

use crate::booking::{Booking, BookingStatus};
use crate::money::Money;
use crate::types::{Guest, Room, RoomStatus, RoomType};
use time::Date;

/// Finds a guest by ID in a slice sorted by ascending `guest_id`.
///
/// Unsaved guests (no ID) sort first, as `None < Some(_)`.
#[must_use]
pub fn find_guest_by_id(guests: &[Guest], guest_id: i64) -> Option<&Guest> {
    guests
        .binary_search_by(|g| g.guest_id.cmp(&Some(guest_id)))
        .ok()
        .and_then(|index| guests.get(index))
}

/// Returns rooms whose nightly price lies within `[min, max]`.
///
/// An inverted range yields no rooms.
#[must_use]
pub fn rooms_in_price_range(rooms: &[Room], min: Money, max: Money) -> Vec<Room> {
    if min > max {
        return Vec::new();
    }
    rooms
        .iter()
        .filter(|r| r.price_per_night >= min && r.price_per_night <= max)
        .cloned()
        .collect()
}

/// Sorts rooms by nightly price, cheapest first. Equal prices keep their order.
pub fn sort_rooms_by_price(rooms: &mut [Room]) {
    rooms.sort_by_key(|r| r.price_per_night);
}

#[must_use]
pub fn filter_rooms_by_type(rooms: &[Room], room_type: RoomType) -> Vec<Room> {
    rooms
        .iter()
        .filter(|r| r.room_type == room_type)
        .cloned()
        .collect()
}

#[must_use]
pub fn filter_rooms_by_status(rooms: &[Room], status: RoomStatus) -> Vec<Room> {
    rooms
        .iter()
        .filter(|r| r.status == status)
        .cloned()
        .collect()
}

#[must_use]
pub fn filter_bookings_by_status(bookings: &[Booking], status: BookingStatus) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|b| b.status == status)
        .cloned()
        .collect()
}

/// Returns bookings whose check-in date falls within `[start, end]`.
#[must_use]
pub fn bookings_checking_in_between(bookings: &[Booking], start: Date, end: Date) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|b| b.stay.check_in() >= start && b.stay.check_in() <= end)
        .cloned()
        .collect()
}
