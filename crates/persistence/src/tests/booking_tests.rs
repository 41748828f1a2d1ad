// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_test_booking, create_test_persistence, create_test_room, seed_guest_and_rooms,
};
use crate::{BookingDetails, Persistence, PersistenceError};
use hotel_desk::{Command, TransitionResult, apply};
use hotel_desk_domain::{Booking, BookingStatus, RoomType, StayRange};
use time::macros::date;

fn booking_ids(bookings: &[Booking]) -> Vec<i64> {
    bookings.iter().filter_map(|b| b.booking_id).collect()
}

#[test]
fn test_insert_and_get_booking() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);
    let booking: Booking =
        create_test_booking(guest_id, 101, date!(2026 - 09 - 01), date!(2026 - 09 - 04));

    let booking_id: i64 = persistence.insert_booking(&booking).unwrap();
    let stored: Booking = persistence.get_booking(booking_id).unwrap().unwrap();

    assert_eq!(stored.booking_id, Some(booking_id));
    assert_eq!(stored.stay, booking.stay);
    assert_eq!(stored.total_price, booking.total_price);
    assert_eq!(stored.status, BookingStatus::Confirmed);
    assert!(persistence.get_booking(booking_id + 100).unwrap().is_none());
}

#[test]
fn test_insert_rejects_overlapping_booking() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);
    let first_id: i64 = persistence
        .insert_booking(&create_test_booking(
            guest_id,
            101,
            date!(2026 - 09 - 01),
            date!(2026 - 09 - 04),
        ))
        .unwrap();

    let result: Result<i64, PersistenceError> = persistence.insert_booking(&create_test_booking(
        guest_id,
        101,
        date!(2026 - 09 - 03),
        date!(2026 - 09 - 05),
    ));
    assert_eq!(
        result,
        Err(PersistenceError::OverlappingBooking {
            room_number: 101,
            conflicting_booking_id: first_id,
        })
    );

    // Same dates in another room are fine, as is a same-day turnover.
    assert!(
        persistence
            .insert_booking(&create_test_booking(
                guest_id,
                201,
                date!(2026 - 09 - 01),
                date!(2026 - 09 - 04),
            ))
            .is_ok()
    );
    assert!(
        persistence
            .insert_booking(&create_test_booking(
                guest_id,
                101,
                date!(2026 - 09 - 04),
                date!(2026 - 09 - 06),
            ))
            .is_ok()
    );
}

#[test]
fn test_insert_rejects_unknown_guest_or_room() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);

    assert!(matches!(
        persistence.insert_booking(&create_test_booking(
            guest_id + 50,
            101,
            date!(2026 - 09 - 01),
            date!(2026 - 09 - 02),
        )),
        Err(PersistenceError::ForeignKeyViolation(_))
    ));
    assert!(matches!(
        persistence.insert_booking(&create_test_booking(
            guest_id,
            999,
            date!(2026 - 09 - 01),
            date!(2026 - 09 - 02),
        )),
        Err(PersistenceError::ForeignKeyViolation(_))
    ));
}

#[test]
fn test_get_booking_details_joins_guest_and_room() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);
    let booking_id: i64 = persistence
        .insert_booking(&create_test_booking(
            guest_id,
            201,
            date!(2026 - 09 - 01),
            date!(2026 - 09 - 02),
        ))
        .unwrap();

    let details: BookingDetails = persistence
        .get_booking_details(booking_id)
        .unwrap()
        .unwrap();
    assert_eq!(details.booking.booking_id, Some(booking_id));
    assert_eq!(details.guest.email, "alan@example.com");
    assert_eq!(details.room.room_number, 201);
    assert!(persistence.get_booking_details(9_999).unwrap().is_none());
}

#[test]
fn test_update_booking_excludes_itself_from_overlap() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);
    let booking_id: i64 = persistence
        .insert_booking(&create_test_booking(
            guest_id,
            101,
            date!(2026 - 09 - 01),
            date!(2026 - 09 - 04),
        ))
        .unwrap();
    let other_id: i64 = persistence
        .insert_booking(&create_test_booking(
            guest_id,
            101,
            date!(2026 - 09 - 10),
            date!(2026 - 09 - 12),
        ))
        .unwrap();

    let mut booking: Booking = persistence.get_booking(booking_id).unwrap().unwrap();
    booking.stay = StayRange::new(date!(2026 - 09 - 02), date!(2026 - 09 - 06)).unwrap();
    persistence.update_booking(&booking).unwrap();
    assert_eq!(
        persistence.get_booking(booking_id).unwrap().unwrap().stay,
        booking.stay
    );

    booking.stay = StayRange::new(date!(2026 - 09 - 05), date!(2026 - 09 - 11)).unwrap();
    assert_eq!(
        persistence.update_booking(&booking),
        Err(PersistenceError::OverlappingBooking {
            room_number: 101,
            conflicting_booking_id: other_id,
        })
    );
}

#[test]
fn test_update_missing_booking() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);
    let mut ghost: Booking =
        create_test_booking(guest_id, 101, date!(2026 - 09 - 01), date!(2026 - 09 - 02));
    ghost.booking_id = Some(404);
    assert_eq!(
        persistence.update_booking(&ghost),
        Err(PersistenceError::BookingNotFound(404))
    );
}

#[test]
fn test_apply_transition_updates_status_and_room_flag() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);
    let booking_id: i64 = persistence
        .insert_booking(&create_test_booking(
            guest_id,
            101,
            date!(2026 - 09 - 01),
            date!(2026 - 09 - 04),
        ))
        .unwrap();
    let booking: Booking = persistence.get_booking(booking_id).unwrap().unwrap();

    let checked_in: TransitionResult = apply(
        &booking,
        Command::CheckIn {
            today: date!(2026 - 09 - 01),
        },
    )
    .unwrap();
    persistence.apply_transition(&checked_in).unwrap();
    assert_eq!(
        persistence.get_booking(booking_id).unwrap().unwrap().status,
        BookingStatus::CheckedIn
    );
    assert!(!persistence.get_room(101).unwrap().unwrap().is_available);

    let paid: TransitionResult = apply(
        &checked_in.booking,
        Command::RecordPayment {
            method: String::from("Cash"),
        },
    )
    .unwrap();
    persistence.apply_transition(&paid).unwrap();

    let checked_out: TransitionResult = apply(&paid.booking, Command::CheckOut).unwrap();
    persistence.apply_transition(&checked_out).unwrap();

    let stored: Booking = persistence.get_booking(booking_id).unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::CheckedOut);
    assert!(stored.is_paid);
    assert_eq!(stored.payment_method.as_deref(), Some("Cash"));
    assert!(persistence.get_room(101).unwrap().unwrap().is_available);
}

#[test]
fn test_delete_checked_in_booking_frees_room() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);
    let booking_id: i64 = persistence
        .insert_booking(&create_test_booking(
            guest_id,
            101,
            date!(2026 - 09 - 01),
            date!(2026 - 09 - 04),
        ))
        .unwrap();
    let booking: Booking = persistence.get_booking(booking_id).unwrap().unwrap();
    let checked_in: TransitionResult = apply(
        &booking,
        Command::CheckIn {
            today: date!(2026 - 09 - 02),
        },
    )
    .unwrap();
    persistence.apply_transition(&checked_in).unwrap();

    persistence.delete_booking(booking_id).unwrap();
    assert!(persistence.get_booking(booking_id).unwrap().is_none());
    assert!(persistence.get_room(101).unwrap().unwrap().is_available);
    assert_eq!(
        persistence.delete_booking(booking_id),
        Err(PersistenceError::BookingNotFound(booking_id))
    );
}

#[test]
fn test_moving_checked_in_booking_swaps_room_flags() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);
    persistence
        .create_room(&create_test_room(301, RoomType::Suite, 30_000))
        .unwrap();
    let booking_id: i64 = persistence
        .insert_booking(&create_test_booking(
            guest_id,
            201,
            date!(2026 - 09 - 01),
            date!(2026 - 09 - 04),
        ))
        .unwrap();
    let booking: Booking = persistence.get_booking(booking_id).unwrap().unwrap();
    let checked_in: TransitionResult = apply(
        &booking,
        Command::CheckIn {
            today: date!(2026 - 09 - 01),
        },
    )
    .unwrap();
    persistence.apply_transition(&checked_in).unwrap();
    assert!(!persistence.get_room(201).unwrap().unwrap().is_available);

    let mut moved: Booking = checked_in.booking;
    moved.room_number = 301;
    persistence.update_booking(&moved).unwrap();

    assert_eq!(persistence.get_booking(booking_id).unwrap().unwrap().room_number, 301);
    assert!(persistence.get_room(201).unwrap().unwrap().is_available);
    assert!(!persistence.get_room(301).unwrap().unwrap().is_available);
}

#[test]
fn test_moving_confirmed_booking_leaves_room_flags() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);
    let booking_id: i64 = persistence
        .insert_booking(&create_test_booking(
            guest_id,
            101,
            date!(2026 - 09 - 01),
            date!(2026 - 09 - 04),
        ))
        .unwrap();

    let mut moved: Booking = persistence.get_booking(booking_id).unwrap().unwrap();
    moved.room_number = 201;
    persistence.update_booking(&moved).unwrap();

    assert!(persistence.get_room(101).unwrap().unwrap().is_available);
    assert!(persistence.get_room(201).unwrap().unwrap().is_available);
}

#[test]
fn test_insert_checked_in_booking_marks_room_unavailable() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);
    let mut booking: Booking =
        create_test_booking(guest_id, 101, date!(2026 - 09 - 01), date!(2026 - 09 - 04));
    booking.status = BookingStatus::CheckedIn;

    let booking_id: i64 = persistence.insert_booking(&booking).unwrap();

    assert_eq!(
        persistence.get_booking(booking_id).unwrap().unwrap().status,
        BookingStatus::CheckedIn
    );
    assert!(!persistence.get_room(101).unwrap().unwrap().is_available);
    assert!(persistence.get_room(201).unwrap().unwrap().is_available);
}

#[test]
fn test_rejected_checked_in_insert_leaves_room_available() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);
    persistence
        .insert_booking(&create_test_booking(
            guest_id,
            101,
            date!(2026 - 09 - 01),
            date!(2026 - 09 - 04),
        ))
        .unwrap();
    let mut overlapping: Booking =
        create_test_booking(guest_id, 101, date!(2026 - 09 - 02), date!(2026 - 09 - 03));
    overlapping.status = BookingStatus::CheckedIn;

    assert!(matches!(
        persistence.insert_booking(&overlapping),
        Err(PersistenceError::OverlappingBooking { .. })
    ));
    assert!(persistence.get_room(101).unwrap().unwrap().is_available);
}

#[test]
fn test_booking_list_queries() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);

    let early: i64 = persistence
        .insert_booking(&create_test_booking(
            guest_id,
            101,
            date!(2026 - 10 - 01),
            date!(2026 - 10 - 03),
        ))
        .unwrap();
    let middle: i64 = persistence
        .insert_booking(&create_test_booking(
            guest_id,
            201,
            date!(2026 - 10 - 05),
            date!(2026 - 10 - 08),
        ))
        .unwrap();
    let mut cancelled = create_test_booking(
        guest_id,
        101,
        date!(2026 - 10 - 06),
        date!(2026 - 10 - 07),
    );
    cancelled.status = BookingStatus::Cancelled;
    let cancelled_id: i64 = persistence.insert_booking(&cancelled).unwrap();

    assert_eq!(
        booking_ids(&persistence.list_bookings().unwrap()),
        vec![early, middle, cancelled_id]
    );
    assert_eq!(
        booking_ids(&persistence.list_bookings_for_room(101).unwrap()),
        vec![early]
    );
    assert_eq!(
        booking_ids(
            &persistence
                .list_bookings_by_status(BookingStatus::Cancelled)
                .unwrap()
        ),
        vec![cancelled_id]
    );
    assert_eq!(
        booking_ids(&persistence.list_bookings_for_guest(guest_id).unwrap()),
        vec![cancelled_id, middle, early]
    );

    // check_in <= end AND check_out >= start: a stay ending on `start` counts.
    assert_eq!(
        booking_ids(
            &persistence
                .list_bookings_in_range(date!(2026 - 10 - 03), date!(2026 - 10 - 05))
                .unwrap()
        ),
        vec![early, middle]
    );
    assert!(
        persistence
            .list_bookings_in_range(date!(2026 - 10 - 05), date!(2026 - 10 - 01))
            .unwrap()
            .is_empty()
    );
}
