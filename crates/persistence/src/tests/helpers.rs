// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use hotel_desk_domain::{Booking, BookingStatus, Guest, Money, Room, RoomType, StayRange};
use time::Date;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn create_test_guest(first: &str, last: &str, email: &str) -> Guest {
    Guest::new(first, last, email, "555-0100", 0, "Canadian")
}

pub fn create_test_room(room_number: i64, room_type: RoomType, price_cents: i64) -> Room {
    Room::new(room_number, room_type, Money::from_cents(price_cents), 2, false)
}

pub fn create_test_booking(
    guest_id: i64,
    room_number: i64,
    check_in: Date,
    check_out: Date,
) -> Booking {
    let stay: StayRange = StayRange::new(check_in, check_out).unwrap();
    Booking {
        booking_id: None,
        guest_id,
        room_number,
        stay,
        number_of_guests: 1,
        total_price: Money::from_cents(10_000 * i64::from(stay.nights())),
        status: BookingStatus::Confirmed,
        is_paid: false,
        payment_method: None,
    }
}

/// Stores one guest and rooms 101 (single, 100.00) and 201 (double, 150.00).
///
/// Returns the guest ID.
pub fn seed_guest_and_rooms(persistence: &mut Persistence) -> i64 {
    let guest_id: i64 = persistence
        .create_guest(&create_test_guest("Alan", "Turing", "alan@example.com"))
        .unwrap();
    persistence
        .create_room(&create_test_room(101, RoomType::Single, 10_000))
        .unwrap();
    persistence
        .create_room(&create_test_room(201, RoomType::Double, 15_000))
        .unwrap();
    guest_id
}
