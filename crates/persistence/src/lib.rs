// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Hotel Desk.
//!
//! This crate stores guests, rooms and bookings in `SQLite` through Diesel.
//!
//! ## Schema
//!
//! The schema is embedded from `migrations/` and applied on every open.
//! Foreign keys are enforced and verified at start-up: a guest or room
//! referenced by a booking cannot be deleted.
//!
//! ## Storage Conventions
//!
//! - Dates are ISO `YYYY-MM-DD` text, so string comparison is date order
//! - Money is integer cents
//! - Booleans are `0`/`1` integers
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives every caller its own shared-cache
//! in-memory database, so tests never see each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use hotel_desk::TransitionResult;
use hotel_desk_domain::{Booking, BookingStatus, Guest, Money, Room, RoomType, StayRange};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::BookingDetails;
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Persistence adapter for guests, rooms and bookings.
///
/// One adapter owns one connection. Callers that share it across tasks wrap
/// it in a mutex; every method runs to completion before the next starts.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:hotel_desk_mem_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if missing and switched to WAL journaling.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Guests
    // ========================================================================

    /// Stores a new guest and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is already used or the insert fails.
    pub fn create_guest(&mut self, guest: &Guest) -> Result<i64, PersistenceError> {
        mutations::guests::insert_guest(&mut self.conn, guest)
    }

    /// Retrieves a guest by ID, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_guest(&mut self, guest_id: i64) -> Result<Option<Guest>, PersistenceError> {
        queries::guests::get_guest(&mut self.conn, guest_id)
    }

    /// Lists all guests ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_guests(&mut self) -> Result<Vec<Guest>, PersistenceError> {
        queries::guests::list_guests(&mut self.conn)
    }

    /// Overwrites a stored guest.
    ///
    /// # Errors
    ///
    /// Returns an error if the guest does not exist, the email is used by
    /// another guest, or the update fails.
    pub fn update_guest(&mut self, guest: &Guest) -> Result<(), PersistenceError> {
        mutations::guests::update_guest(&mut self.conn, guest)
    }

    /// Deletes a guest with no bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the guest does not exist or has bookings.
    pub fn delete_guest(&mut self, guest_id: i64) -> Result<(), PersistenceError> {
        mutations::guests::delete_guest(&mut self.conn, guest_id)
    }

    /// Finds guests by a case-insensitive substring of first or last name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn search_guests_by_name(&mut self, query: &str) -> Result<Vec<Guest>, PersistenceError> {
        queries::guests::search_guests_by_name(&mut self.conn, query)
    }

    /// Lists VIP guests, highest loyalty balance first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_vip_guests(&mut self) -> Result<Vec<Guest>, PersistenceError> {
        queries::guests::list_vip_guests(&mut self.conn)
    }

    /// Retrieves a guest by email, or `None` if no guest uses it.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_guest_by_email(&mut self, email: &str) -> Result<Option<Guest>, PersistenceError> {
        queries::guests::find_guest_by_email(&mut self.conn, email)
    }

    /// Counts a guest's bookings of any status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_bookings_by_guest(&mut self, guest_id: i64) -> Result<i64, PersistenceError> {
        queries::guests::count_bookings_by_guest(&mut self.conn, guest_id)
    }

    // ========================================================================
    // Rooms
    // ========================================================================

    /// Stores a new room.
    ///
    /// # Errors
    ///
    /// Returns an error if the room number is taken or the insert fails.
    pub fn create_room(&mut self, room: &Room) -> Result<(), PersistenceError> {
        mutations::rooms::insert_room(&mut self.conn, room)
    }

    /// Stores several rooms in one transaction and returns how many.
    ///
    /// # Errors
    ///
    /// Returns the first failure; no room is stored in that case.
    pub fn create_rooms_batch(&mut self, rooms: &[Room]) -> Result<usize, PersistenceError> {
        mutations::rooms::insert_rooms_batch(&mut self.conn, rooms)
    }

    /// Retrieves a room by number, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room(&mut self, room_number: i64) -> Result<Option<Room>, PersistenceError> {
        queries::rooms::get_room(&mut self.conn, room_number)
    }

    /// Lists all rooms ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(&mut self) -> Result<Vec<Room>, PersistenceError> {
        queries::rooms::list_rooms(&mut self.conn)
    }

    /// Overwrites a stored room.
    ///
    /// # Errors
    ///
    /// Returns an error if the room does not exist or the update fails.
    pub fn update_room(&mut self, room: &Room) -> Result<(), PersistenceError> {
        mutations::rooms::update_room(&mut self.conn, room)
    }

    /// Sets a room's availability flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the room does not exist or the update fails.
    pub fn set_room_availability(
        &mut self,
        room_number: i64,
        is_available: bool,
    ) -> Result<(), PersistenceError> {
        mutations::rooms::set_room_availability(&mut self.conn, room_number, is_available)
    }

    /// Deletes a room with no bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the room does not exist or has bookings.
    pub fn delete_room(&mut self, room_number: i64) -> Result<(), PersistenceError> {
        mutations::rooms::delete_room(&mut self.conn, room_number)
    }

    /// Lists rooms of one type.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms_by_type(
        &mut self,
        room_type: RoomType,
    ) -> Result<Vec<Room>, PersistenceError> {
        queries::rooms::list_rooms_by_type(&mut self.conn, room_type)
    }

    /// Lists rooms with no room-blocking booking overlapping `stay`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_available_rooms(
        &mut self,
        stay: &StayRange,
    ) -> Result<Vec<Room>, PersistenceError> {
        queries::rooms::list_available_rooms(&mut self.conn, stay)
    }

    /// Lists rooms priced within `[min, max]` per night, cheapest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms_by_price_range(
        &mut self,
        min: Money,
        max: Money,
    ) -> Result<Vec<Room>, PersistenceError> {
        queries::rooms::list_rooms_by_price_range(&mut self.conn, min, max)
    }

    // ========================================================================
    // Bookings
    // ========================================================================

    /// Stores a new booking and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the room is already held for an overlapping stay,
    /// the guest or room does not exist, or the insert fails.
    pub fn insert_booking(&mut self, booking: &Booking) -> Result<i64, PersistenceError> {
        mutations::bookings::insert_booking(&mut self.conn, booking)
    }

    /// Retrieves a booking by ID, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_booking(&mut self, booking_id: i64) -> Result<Option<Booking>, PersistenceError> {
        queries::bookings::get_booking(&mut self.conn, booking_id)
    }

    /// Retrieves a booking with its guest and room.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_booking_details(
        &mut self,
        booking_id: i64,
    ) -> Result<Option<BookingDetails>, PersistenceError> {
        queries::bookings::get_booking_details(&mut self.conn, booking_id)
    }

    /// Lists all bookings ordered by check-in date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings(&mut self) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_bookings(&mut self.conn)
    }

    /// Lists the bookings that currently hold a room (all but cancelled).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_for_room(
        &mut self,
        room_number: i64,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_bookings_for_room(&mut self.conn, room_number)
    }

    /// Overwrites a stored booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking does not exist, the new stay
    /// overlaps another booking, or the update fails.
    pub fn update_booking(&mut self, booking: &Booking) -> Result<(), PersistenceError> {
        mutations::bookings::update_booking(&mut self.conn, booking)
    }

    /// Deletes a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking does not exist or the delete fails.
    pub fn delete_booking(&mut self, booking_id: i64) -> Result<(), PersistenceError> {
        mutations::bookings::delete_booking(&mut self.conn, booking_id)
    }

    /// Persists a booking transition and its room effect in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking does not exist or a write fails.
    pub fn apply_transition(&mut self, result: &TransitionResult) -> Result<(), PersistenceError> {
        mutations::bookings::apply_transition(&mut self.conn, result)
    }

    /// Lists bookings whose stay touches `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_in_range(
        &mut self,
        start: Date,
        end: Date,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_bookings_in_range(&mut self.conn, start, end)
    }

    /// Lists bookings in one status ordered by check-in date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_by_status(
        &mut self,
        status: BookingStatus,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_bookings_by_status(&mut self.conn, status)
    }

    /// Lists a guest's bookings, most recent check-in first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_for_guest(
        &mut self,
        guest_id: i64,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_bookings_for_guest(&mut self.conn, guest_id)
    }
}
