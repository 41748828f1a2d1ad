// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_test_booking, create_test_persistence, create_test_room, seed_guest_and_rooms,
};
use crate::{Persistence, PersistenceError};
use hotel_desk_domain::{BookingStatus, Money, Room, RoomStatus, RoomType, StayRange};
use time::macros::date;

fn room_numbers(rooms: &[Room]) -> Vec<i64> {
    rooms.iter().map(|r| r.room_number).collect()
}

#[test]
fn test_create_and_get_room_round_trips_all_fields() {
    let mut persistence: Persistence = create_test_persistence();
    let mut room: Room = Room::new(305, RoomType::Suite, Money::from_cents(42_050), 4, true);
    room.amenities = vec![String::from("WiFi"), String::from("Jacuzzi")];
    room.status = RoomStatus::Maintenance;
    persistence.create_room(&room).unwrap();

    let stored: Room = persistence.get_room(305).unwrap().unwrap();
    assert_eq!(stored, room);
}

#[test]
fn test_duplicate_room_number_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_room(&create_test_room(101, RoomType::Single, 9_000))
        .unwrap();
    assert_eq!(
        persistence.create_room(&create_test_room(101, RoomType::Double, 12_000)),
        Err(PersistenceError::DuplicateRoomNumber(101))
    );
}

#[test]
fn test_batch_insert_is_all_or_nothing() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_room(&create_test_room(103, RoomType::Single, 9_000))
        .unwrap();

    let batch: Vec<Room> = vec![
        create_test_room(101, RoomType::Single, 9_000),
        create_test_room(102, RoomType::Single, 9_000),
        create_test_room(103, RoomType::Double, 12_000),
    ];
    assert_eq!(
        persistence.create_rooms_batch(&batch),
        Err(PersistenceError::DuplicateRoomNumber(103))
    );
    assert_eq!(room_numbers(&persistence.list_rooms().unwrap()), vec![103]);

    let good: Vec<Room> = vec![
        create_test_room(101, RoomType::Single, 9_000),
        create_test_room(102, RoomType::Single, 9_000),
    ];
    assert_eq!(persistence.create_rooms_batch(&good).unwrap(), 2);
    assert_eq!(
        room_numbers(&persistence.list_rooms().unwrap()),
        vec![101, 102, 103]
    );
}

#[test]
fn test_update_room() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_room(&create_test_room(101, RoomType::Single, 9_000))
        .unwrap();

    let mut room: Room = persistence.get_room(101).unwrap().unwrap();
    room.price_per_night = Money::from_cents(9_900);
    room.status = RoomStatus::Dirty;
    room.add_amenity("TV");
    persistence.update_room(&room).unwrap();

    assert_eq!(persistence.get_room(101).unwrap().unwrap(), room);
    assert_eq!(
        persistence.update_room(&create_test_room(999, RoomType::Single, 1)),
        Err(PersistenceError::RoomNotFound(999))
    );
}

#[test]
fn test_set_room_availability() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_room(&create_test_room(101, RoomType::Single, 9_000))
        .unwrap();

    persistence.set_room_availability(101, false).unwrap();
    assert!(!persistence.get_room(101).unwrap().unwrap().is_available);
    persistence.set_room_availability(101, true).unwrap();
    assert!(persistence.get_room(101).unwrap().unwrap().is_available);

    assert_eq!(
        persistence.set_room_availability(404, true),
        Err(PersistenceError::RoomNotFound(404))
    );
}

#[test]
fn test_delete_room() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);
    persistence
        .insert_booking(&create_test_booking(
            guest_id,
            101,
            date!(2026 - 07 - 01),
            date!(2026 - 07 - 02),
        ))
        .unwrap();

    assert!(matches!(
        persistence.delete_room(101),
        Err(PersistenceError::RoomHasBookings {
            room_number: 101,
            ..
        })
    ));

    persistence.delete_room(201).unwrap();
    assert!(persistence.get_room(201).unwrap().is_none());
    assert_eq!(
        persistence.delete_room(201),
        Err(PersistenceError::RoomNotFound(201))
    );
}

#[test]
fn test_list_rooms_by_type() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_rooms_batch(&[
            create_test_room(201, RoomType::Double, 12_000),
            create_test_room(101, RoomType::Single, 9_000),
            create_test_room(202, RoomType::Double, 12_500),
        ])
        .unwrap();

    let doubles: Vec<Room> = persistence.list_rooms_by_type(RoomType::Double).unwrap();
    assert_eq!(room_numbers(&doubles), vec![201, 202]);
    assert!(
        persistence
            .list_rooms_by_type(RoomType::Suite)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_list_rooms_by_price_range() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_rooms_batch(&[
            create_test_room(101, RoomType::Single, 9_000),
            create_test_room(201, RoomType::Double, 15_000),
            create_test_room(102, RoomType::Single, 8_000),
            create_test_room(301, RoomType::Suite, 40_000),
        ])
        .unwrap();

    let mid: Vec<Room> = persistence
        .list_rooms_by_price_range(Money::from_cents(8_000), Money::from_cents(15_000))
        .unwrap();
    assert_eq!(room_numbers(&mid), vec![102, 101, 201]);

    let inverted: Vec<Room> = persistence
        .list_rooms_by_price_range(Money::from_cents(15_000), Money::from_cents(8_000))
        .unwrap();
    assert!(inverted.is_empty());
}

#[test]
fn test_list_available_rooms_uses_half_open_overlap() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);
    persistence
        .insert_booking(&create_test_booking(
            guest_id,
            101,
            date!(2026 - 08 - 10),
            date!(2026 - 08 - 13),
        ))
        .unwrap();

    let overlapping: StayRange =
        StayRange::new(date!(2026 - 08 - 12), date!(2026 - 08 - 14)).unwrap();
    assert_eq!(
        room_numbers(&persistence.list_available_rooms(&overlapping).unwrap()),
        vec![201]
    );

    let turnover: StayRange =
        StayRange::new(date!(2026 - 08 - 13), date!(2026 - 08 - 15)).unwrap();
    assert_eq!(
        room_numbers(&persistence.list_available_rooms(&turnover).unwrap()),
        vec![101, 201]
    );

    let before: StayRange = StayRange::new(date!(2026 - 08 - 08), date!(2026 - 08 - 10)).unwrap();
    assert_eq!(
        room_numbers(&persistence.list_available_rooms(&before).unwrap()),
        vec![101, 201]
    );
}

#[test]
fn test_cancelled_booking_frees_room_for_availability() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);
    let mut booking = create_test_booking(
        guest_id,
        101,
        date!(2026 - 08 - 10),
        date!(2026 - 08 - 13),
    );
    booking.status = BookingStatus::Cancelled;
    persistence.insert_booking(&booking).unwrap();

    let stay: StayRange = StayRange::new(date!(2026 - 08 - 10), date!(2026 - 08 - 13)).unwrap();
    assert_eq!(
        room_numbers(&persistence.list_available_rooms(&stay).unwrap()),
        vec![101, 201]
    );
}
