// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_guest, create_test_persistence};
use crate::{Persistence, PersistenceError};
use std::path::PathBuf;

#[test]
fn test_in_memory_database_enforces_foreign_keys() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first: Persistence = create_test_persistence();
    let mut second: Persistence = create_test_persistence();

    first
        .create_guest(&create_test_guest("Ada", "Lovelace", "ada@example.com"))
        .unwrap();

    assert_eq!(first.list_guests().unwrap().len(), 1);
    assert!(second.list_guests().unwrap().is_empty());
}

#[test]
fn test_file_database_persists_across_connections() {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "hotel_desk_init_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        persistence
            .create_guest(&create_test_guest("Ada", "Lovelace", "ada@example.com"))
            .unwrap();
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    let guests = reopened.list_guests().unwrap();
    assert_eq!(guests.len(), 1);
    assert_eq!(guests[0].email, "ada@example.com");

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

#[test]
fn test_persistence_error_display() {
    assert_eq!(
        PersistenceError::RoomHasBookings {
            room_number: 101,
            booking_count: 2
        }
        .to_string(),
        "Room 101 cannot be deleted: referenced by 2 booking(s)"
    );
    assert_eq!(
        PersistenceError::ForeignKeyEnforcementNotEnabled.to_string(),
        "Foreign key enforcement is not enabled"
    );
}
