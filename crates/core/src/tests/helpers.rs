// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::BookingRequest;
use hotel_desk_domain::{Booking, BookingStatus, Guest, Money, Room, RoomType, StayRange};
use time::Date;
use time::macros::date;

pub fn create_test_guest() -> Guest {
    Guest::new(
        "Marie",
        "Curie",
        "marie@example.org",
        "555-0199",
        120,
        "French",
    )
    .with_id(1)
}

/// Room 101: a double at 120.00 per night for up to two guests.
pub fn create_test_room() -> Room {
    Room::new(101, RoomType::Double, Money::from_cents(12_000), 2, false)
}

pub fn create_test_stay(check_in: Date, check_out: Date) -> StayRange {
    StayRange::new(check_in, check_out).unwrap()
}

pub fn create_test_request(stay: StayRange, number_of_guests: u32) -> BookingRequest {
    BookingRequest {
        guest_id: 1,
        room_number: 101,
        stay,
        number_of_guests,
    }
}

/// A confirmed three-night booking in room 101 from 2026-05-10.
pub fn create_test_booking(booking_id: i64, status: BookingStatus) -> Booking {
    Booking {
        booking_id: Some(booking_id),
        guest_id: 1,
        room_number: 101,
        stay: create_test_stay(date!(2026 - 05 - 10), date!(2026 - 05 - 13)),
        number_of_guests: 2,
        total_price: Money::from_cents(36_000),
        status,
        is_paid: false,
        payment_method: None,
    }
}
