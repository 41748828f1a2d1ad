// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_test_booking, create_test_guest, create_test_persistence, seed_guest_and_rooms,
};
use crate::{Persistence, PersistenceError};
use hotel_desk_domain::Guest;
use time::Date;
use time::macros::date;

#[test]
fn test_create_and_get_guest() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = persistence
        .create_guest(&create_test_guest("Ada", "Lovelace", "ada@example.com"))
        .unwrap();

    let stored: Guest = persistence.get_guest(guest_id).unwrap().unwrap();
    assert_eq!(stored.guest_id, Some(guest_id));
    assert_eq!(stored.full_name(), "Ada Lovelace");
    assert_eq!(stored.phone, "555-0100");
}

#[test]
fn test_get_missing_guest_returns_none() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.get_guest(999).unwrap().is_none());
}

#[test]
fn test_duplicate_email_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_guest(&create_test_guest("Ada", "Lovelace", "ada@example.com"))
        .unwrap();

    let result: Result<i64, PersistenceError> =
        persistence.create_guest(&create_test_guest("Ada", "Byron", "ADA@example.com"));
    assert_eq!(
        result,
        Err(PersistenceError::DuplicateEmail(String::from(
            "ada@example.com"
        )))
    );
}

#[test]
fn test_create_guest_with_explicit_id() {
    let mut persistence: Persistence = create_test_persistence();
    let guest: Guest = create_test_guest("Ada", "Lovelace", "ada@example.com").with_id(42);

    assert_eq!(persistence.create_guest(&guest).unwrap(), 42);
    assert!(persistence.get_guest(42).unwrap().is_some());

    let clash: Guest = create_test_guest("Bob", "Clash", "bob@example.com").with_id(42);
    assert!(matches!(
        persistence.create_guest(&clash),
        Err(PersistenceError::UniqueViolation(_))
    ));
}

#[test]
fn test_update_guest() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = persistence
        .create_guest(&create_test_guest("Ada", "Lovelace", "ada@example.com"))
        .unwrap();

    let mut guest: Guest = persistence.get_guest(guest_id).unwrap().unwrap();
    guest.last_name = String::from("King");
    guest.add_loyalty_points(1500);
    persistence.update_guest(&guest).unwrap();

    let stored: Guest = persistence.get_guest(guest_id).unwrap().unwrap();
    assert_eq!(stored.last_name, "King");
    assert_eq!(stored.loyalty_points, 1500);
}

#[test]
fn test_update_guest_rejects_email_of_another_guest() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_guest(&create_test_guest("Ada", "Lovelace", "ada@example.com"))
        .unwrap();
    let bob_id: i64 = persistence
        .create_guest(&create_test_guest("Bob", "Babbage", "bob@example.com"))
        .unwrap();

    let mut bob: Guest = persistence.get_guest(bob_id).unwrap().unwrap();
    bob.email = String::from("ada@example.com");
    assert!(matches!(
        persistence.update_guest(&bob),
        Err(PersistenceError::DuplicateEmail(_))
    ));

    // Keeping one's own email is fine.
    let bob_again: Guest = persistence.get_guest(bob_id).unwrap().unwrap();
    assert!(persistence.update_guest(&bob_again).is_ok());
}

#[test]
fn test_update_missing_guest() {
    let mut persistence: Persistence = create_test_persistence();
    let ghost: Guest = create_test_guest("No", "Body", "nobody@example.com").with_id(77);
    assert_eq!(
        persistence.update_guest(&ghost),
        Err(PersistenceError::GuestNotFound(77))
    );
}

#[test]
fn test_delete_guest() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = persistence
        .create_guest(&create_test_guest("Ada", "Lovelace", "ada@example.com"))
        .unwrap();

    persistence.delete_guest(guest_id).unwrap();
    assert!(persistence.get_guest(guest_id).unwrap().is_none());
    assert_eq!(
        persistence.delete_guest(guest_id),
        Err(PersistenceError::GuestNotFound(guest_id))
    );
}

#[test]
fn test_delete_guest_with_bookings_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let guest_id: i64 = seed_guest_and_rooms(&mut persistence);
    persistence
        .insert_booking(&create_test_booking(
            guest_id,
            101,
            date!(2026 - 07 - 01),
            date!(2026 - 07 - 03),
        ))
        .unwrap();

    assert_eq!(
        persistence.delete_guest(guest_id),
        Err(PersistenceError::GuestHasBookings {
            guest_id,
            booking_count: 1
        })
    );
}

#[test]
fn test_search_guests_by_name() {
    let mut persistence: Persistence = create_test_persistence();
    for (first, last, email) in [
        ("Grace", "Hopper", "grace@example.com"),
        ("Ada", "Lovelace", "ada@example.com"),
        ("Alan", "Turing", "alan@example.com"),
        ("Annie", "Easley", "annie@example.com"),
    ] {
        persistence
            .create_guest(&create_test_guest(first, last, email))
            .unwrap();
    }

    let matched: Vec<Guest> = persistence.search_guests_by_name("AN").unwrap();
    let names: Vec<String> = matched.iter().map(Guest::full_name).collect();
    assert_eq!(names, vec!["Annie Easley", "Alan Turing"]);

    let everyone: Vec<Guest> = persistence.search_guests_by_name("   ").unwrap();
    let last_names: Vec<&str> = everyone.iter().map(|g| g.last_name.as_str()).collect();
    assert_eq!(last_names, vec!["Easley", "Hopper", "Lovelace", "Turing"]);
}

#[test]
fn test_search_treats_wildcards_literally() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_guest(&create_test_guest("Ada", "Lovelace", "ada@example.com"))
        .unwrap();

    assert!(persistence.search_guests_by_name("%").unwrap().is_empty());
    assert!(persistence.search_guests_by_name("_").unwrap().is_empty());
}

#[test]
fn test_find_guest_by_email_ignores_case() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_guest(&create_test_guest("Ada", "Lovelace", "ada@example.com"))
        .unwrap();

    let found: Option<Guest> = persistence.find_guest_by_email(" Ada@Example.com ").unwrap();
    assert_eq!(found.map(|g| g.first_name), Some(String::from("Ada")));
    assert!(
        persistence
            .find_guest_by_email("nobody@example.com")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_list_vip_guests_by_points_or_bookings() {
    let mut persistence: Persistence = create_test_persistence();
    let frequent_id: i64 = seed_guest_and_rooms(&mut persistence);

    let mut rich: Guest = create_test_guest("Rich", "Points", "rich@example.com");
    rich.loyalty_points = 5000;
    persistence.create_guest(&rich).unwrap();

    let mut richer: Guest = create_test_guest("Richer", "Points", "richer@example.com");
    richer.loyalty_points = 9000;
    persistence.create_guest(&richer).unwrap();

    let mut edge: Guest = create_test_guest("Edge", "Case", "edge@example.com");
    edge.loyalty_points = 1000;
    persistence.create_guest(&edge).unwrap();

    // Six one-night stays make the seeded guest a VIP.
    let first_night: Date = date!(2026 - 01 - 01);
    for offset in 0..6 {
        let check_in: Date = first_night + time::Duration::days(offset);
        persistence
            .insert_booking(&create_test_booking(
                frequent_id,
                101,
                check_in,
                check_in + time::Duration::days(1),
            ))
            .unwrap();
    }

    let vips: Vec<Guest> = persistence.list_vip_guests().unwrap();
    let names: Vec<&str> = vips.iter().map(|g| g.first_name.as_str()).collect();
    assert_eq!(names, vec!["Richer", "Rich", "Alan"]);
    assert_eq!(persistence.count_bookings_by_guest(frequent_id).unwrap(), 6);
}
