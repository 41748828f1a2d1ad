// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Booking, BookingStatus, DomainError, Guest, Money, Room, RoomStatus, RoomType, StayRange,
};
use time::macros::date;

fn create_test_guest() -> Guest {
    Guest::new(
        " Ada ",
        "Lovelace",
        " Ada@Example.COM ",
        "+44 20 7946 0000",
        250,
        "British",
    )
}

fn create_test_room() -> Room {
    Room::new(101, RoomType::Double, Money::from_cents(12_000), 2, true)
}

fn create_test_booking(booking_id: i64, guest_id: i64, status: BookingStatus) -> Booking {
    Booking {
        booking_id: Some(booking_id),
        guest_id,
        room_number: 101,
        stay: StayRange::new(date!(2026 - 04 - 01), date!(2026 - 04 - 04)).unwrap(),
        number_of_guests: 1,
        total_price: Money::from_cents(36_000),
        status,
        is_paid: false,
        payment_method: None,
    }
}

#[test]
fn test_guest_new_normalizes_fields() {
    let guest: Guest = create_test_guest();
    assert_eq!(guest.guest_id, None);
    assert_eq!(guest.first_name, "Ada");
    assert_eq!(guest.email, "ada@example.com");
    assert_eq!(guest.full_name(), "Ada Lovelace");
}

#[test]
fn test_guest_with_id() {
    let guest: Guest = create_test_guest().with_id(9);
    assert_eq!(guest.guest_id, Some(9));
}

#[test]
fn test_add_loyalty_points_saturates() {
    let mut guest: Guest = create_test_guest();
    assert_eq!(guest.add_loyalty_points(50), 300);

    guest.loyalty_points = u32::MAX - 1;
    assert_eq!(guest.add_loyalty_points(10), u32::MAX);
}

#[test]
fn test_is_vip_by_points_or_booking_count() {
    let mut guest: Guest = create_test_guest();
    assert!(!guest.is_vip(5));
    assert!(guest.is_vip(6));

    guest.loyalty_points = 1000;
    assert!(!guest.is_vip(0));
    guest.loyalty_points = 1001;
    assert!(guest.is_vip(0));
}

#[test]
fn test_total_nights_skips_cancelled_and_other_guests() {
    let guest: Guest = create_test_guest().with_id(1);
    let bookings: Vec<Booking> = vec![
        create_test_booking(1, 1, BookingStatus::CheckedOut),
        create_test_booking(2, 1, BookingStatus::Cancelled),
        create_test_booking(3, 2, BookingStatus::Confirmed),
        create_test_booking(4, 1, BookingStatus::Confirmed),
    ];
    assert_eq!(guest.total_nights(&bookings), 6);
}

#[test]
fn test_room_new_is_available_and_clean() {
    let room: Room = create_test_room();
    assert!(room.is_available);
    assert_eq!(room.status, RoomStatus::Clean);
    assert!(room.amenities.is_empty());
}

#[test]
fn test_can_accommodate() {
    let room: Room = create_test_room();
    assert!(room.can_accommodate(1));
    assert!(room.can_accommodate(2));
    assert!(!room.can_accommodate(3));
}

#[test]
fn test_price_for_stay_is_nights_times_rate() {
    let room: Room = create_test_room();
    let stay: StayRange = StayRange::new(date!(2026 - 04 - 01), date!(2026 - 04 - 04)).unwrap();
    assert_eq!(room.price_for_stay(&stay).unwrap(), Money::from_cents(36_000));
}

#[test]
fn test_amenities_round_trip_through_storage_form() {
    let mut room: Room = create_test_room();
    room.amenities = Room::parse_amenities(" WiFi, ,Minibar,WiFi,  TV ");
    assert_eq!(room.amenities, vec!["WiFi", "Minibar", "TV"]);
    assert_eq!(room.amenities_string(), "WiFi,Minibar,TV");

    room.add_amenity("Safe");
    room.add_amenity("TV");
    room.add_amenity("  ");
    assert_eq!(room.amenities_string(), "WiFi,Minibar,TV,Safe");
}

#[test]
fn test_room_type_parsing() {
    assert_eq!("suite".parse::<RoomType>().unwrap(), RoomType::Suite);
    assert_eq!("DELUXE".parse::<RoomType>().unwrap(), RoomType::Deluxe);
    assert_eq!(" Single ".parse::<RoomType>().unwrap(), RoomType::Single);
    assert!(matches!(
        "penthouse".parse::<RoomType>(),
        Err(DomainError::InvalidRoomType(_))
    ));
}

#[test]
fn test_room_status_parsing() {
    assert_eq!(
        "Maintenance".parse::<RoomStatus>().unwrap(),
        RoomStatus::Maintenance
    );
    assert_eq!(RoomStatus::Occupied.as_str(), "occupied");
    assert!(matches!(
        "flooded".parse::<RoomStatus>(),
        Err(DomainError::InvalidRoomStatus(_))
    ));
}
