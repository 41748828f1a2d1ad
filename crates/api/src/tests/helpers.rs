// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use hotel_desk_persistence::Persistence;

use crate::{BookingRequestBody, CreateRoomRequest, GuestRequest, create_guest, create_room};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn guest_request(first_name: &str, last_name: &str, email: &str) -> GuestRequest {
    GuestRequest {
        first_name: String::from(first_name),
        last_name: String::from(last_name),
        email: String::from(email),
        phone: String::from("555-0199"),
        loyalty_points: 0,
        nationality: String::from("British"),
    }
}

pub fn room_request(
    room_number: i64,
    room_type: &str,
    price: &str,
    occupancy: u32,
) -> CreateRoomRequest {
    CreateRoomRequest {
        room_number,
        room_type: String::from(room_type),
        price_per_night: String::from(price),
        max_occupancy: occupancy,
        has_balcony: false,
        amenities: vec![String::from("WiFi")],
        status: None,
    }
}

pub fn booking_body(
    guest_id: i64,
    room_number: i64,
    check_in: &str,
    check_out: &str,
    guests: u32,
) -> BookingRequestBody {
    BookingRequestBody {
        guest_id,
        room_number,
        check_in_date: String::from(check_in),
        check_out_date: String::from(check_out),
        number_of_guests: guests,
    }
}

/// Creates guest Ada Lovelace plus rooms 101 (Single, 100.00, 1 guest),
/// 201 (Double, 150.00, 2 guests) and 301 (Suite, 400.00, 4 guests).
///
/// Returns the guest ID.
pub fn seed_hotel(persistence: &mut Persistence) -> i64 {
    let guest_id: i64 = create_guest(
        persistence,
        &guest_request("Ada", "Lovelace", "ada@example.com"),
    )
    .expect("Failed to create guest")
    .guest_id;
    for request in [
        room_request(101, "Single", "100.00", 1),
        room_request(201, "Double", "150", 2),
        room_request(301, "Suite", "400.0", 4),
    ] {
        create_room(persistence, &request).expect("Failed to create room");
    }
    guest_id
}
