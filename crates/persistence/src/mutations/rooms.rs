// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hotel_desk_domain::Room;
use tracing::{debug, info};

use crate::data_models::{RoomRecord, flag};
use crate::diesel_schema::rooms;
use crate::error::PersistenceError;
use crate::queries::rooms::{count_bookings_by_room, room_exists};

fn insert_room_row(conn: &mut SqliteConnection, room: &Room) -> Result<(), PersistenceError> {
    if room_exists(conn, room.room_number)? {
        return Err(PersistenceError::DuplicateRoomNumber(room.room_number));
    }
    diesel::insert_into(rooms::table)
        .values(RoomRecord::from_domain(room)?)
        .execute(conn)?;
    Ok(())
}

/// Inserts a room.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateRoomNumber` if the number is taken,
/// or a database error if the insert fails.
pub fn insert_room(conn: &mut SqliteConnection, room: &Room) -> Result<(), PersistenceError> {
    conn.transaction(|conn| insert_room_row(conn, room))?;
    info!(room_number = room.room_number, room_type = %room.room_type, "Created room");
    Ok(())
}

/// Inserts several rooms in one transaction.
///
/// Either every room is stored or, on the first failure, none are.
///
/// # Errors
///
/// Returns the first insert error; the transaction is rolled back.
pub fn insert_rooms_batch(
    conn: &mut SqliteConnection,
    rooms: &[Room],
) -> Result<usize, PersistenceError> {
    conn.transaction(|conn| {
        for room in rooms {
            debug!(room_number = room.room_number, "Inserting room in batch");
            insert_room_row(conn, room)?;
        }
        Ok::<(), PersistenceError>(())
    })?;

    info!(count = rooms.len(), "Created rooms in batch");
    Ok(rooms.len())
}

/// Overwrites every field of a stored room.
///
/// # Errors
///
/// Returns `PersistenceError::RoomNotFound` if the room does not exist, or
/// a database error if the update fails.
pub fn update_room(conn: &mut SqliteConnection, room: &Room) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(rooms::table.filter(rooms::room_number.eq(room.room_number)))
            .set(RoomRecord::from_domain(room)?)
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::RoomNotFound(room.room_number));
    }
    info!(room_number = room.room_number, "Updated room");
    Ok(())
}

/// Sets a room's `is_available` flag.
///
/// # Errors
///
/// Returns `PersistenceError::RoomNotFound` if the room does not exist.
pub fn set_room_availability(
    conn: &mut SqliteConnection,
    room_number: i64,
    is_available: bool,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(rooms::table.filter(rooms::room_number.eq(room_number)))
        .set(rooms::is_available.eq(flag(is_available)))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::RoomNotFound(room_number));
    }
    debug!(room_number, is_available, "Set room availability");
    Ok(())
}

/// Deletes a room that has no bookings.
///
/// # Errors
///
/// Returns `PersistenceError::RoomHasBookings` if bookings reference the
/// room, or `PersistenceError::RoomNotFound` if it does not exist.
pub fn delete_room(conn: &mut SqliteConnection, room_number: i64) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        let booking_count: i64 = count_bookings_by_room(conn, room_number)?;
        if booking_count > 0 {
            return Err(PersistenceError::RoomHasBookings {
                room_number,
                booking_count,
            });
        }

        let deleted: usize =
            diesel::delete(rooms::table.filter(rooms::room_number.eq(room_number)))
                .execute(conn)?;
        if deleted == 0 {
            return Err(PersistenceError::RoomNotFound(room_number));
        }

        info!(room_number, "Deleted room");
        Ok(())
    })
}
