// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hotel_desk_domain::{BookingStatus, Money, Room, RoomType, StayRange};
use tracing::debug;

use crate::data_models::{RoomRow, convert_all};
use crate::diesel_schema::{bookings, rooms};
use crate::error::PersistenceError;

/// Retrieves a room by number.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the room is not found.
pub fn get_room(
    conn: &mut SqliteConnection,
    room_number: i64,
) -> Result<Option<Room>, PersistenceError> {
    debug!(room_number, "Looking up room");

    rooms::table
        .filter(rooms::room_number.eq(room_number))
        .select(RoomRow::as_select())
        .first(conn)
        .optional()?
        .map(RoomRow::into_domain)
        .transpose()
}

/// Checks whether a room with this number exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn room_exists(
    conn: &mut SqliteConnection,
    room_number: i64,
) -> Result<bool, PersistenceError> {
    Ok(diesel::select(diesel::dsl::exists(
        rooms::table.filter(rooms::room_number.eq(room_number)),
    ))
    .get_result(conn)?)
}

/// Lists all rooms ordered by number.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_rooms(conn: &mut SqliteConnection) -> Result<Vec<Room>, PersistenceError> {
    let rows: Vec<RoomRow> = rooms::table
        .order(rooms::room_number.asc())
        .select(RoomRow::as_select())
        .load(conn)?;
    convert_all(rows, RoomRow::into_domain)
}

/// Lists rooms of one type ordered by number.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_rooms_by_type(
    conn: &mut SqliteConnection,
    room_type: RoomType,
) -> Result<Vec<Room>, PersistenceError> {
    let rows: Vec<RoomRow> = rooms::table
        .filter(rooms::room_type.eq(room_type.as_str()))
        .order(rooms::room_number.asc())
        .select(RoomRow::as_select())
        .load(conn)?;
    convert_all(rows, RoomRow::into_domain)
}

/// Lists rooms with a nightly price in `[min, max]`, cheapest first.
///
/// An inverted range yields no rooms.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_rooms_by_price_range(
    conn: &mut SqliteConnection,
    min: Money,
    max: Money,
) -> Result<Vec<Room>, PersistenceError> {
    if min > max {
        return Ok(Vec::new());
    }

    let rows: Vec<RoomRow> = rooms::table
        .filter(rooms::price_cents.between(min.cents(), max.cents()))
        .order((rooms::price_cents.asc(), rooms::room_number.asc()))
        .select(RoomRow::as_select())
        .load(conn)?;
    convert_all(rows, RoomRow::into_domain)
}

/// Lists the numbers of rooms held by a room-blocking booking that overlaps
/// `stay`.
///
/// Two stays overlap when `check_in_date < :check_out AND check_out_date >
/// :check_in`. ISO date text sorts chronologically, so the comparison runs
/// on the stored strings.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn occupied_room_numbers(
    conn: &mut SqliteConnection,
    stay: &StayRange,
) -> Result<Vec<i64>, PersistenceError> {
    Ok(bookings::table
        .filter(bookings::status.ne(BookingStatus::Cancelled.as_str()))
        .filter(bookings::check_in_date.lt(stay.check_out().to_string()))
        .filter(bookings::check_out_date.gt(stay.check_in().to_string()))
        .select(bookings::room_number)
        .distinct()
        .load(conn)?)
}

/// Lists rooms free for every night of `stay`, ordered by number.
///
/// The room's `is_available` flag only reflects current occupancy and is
/// not consulted.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_available_rooms(
    conn: &mut SqliteConnection,
    stay: &StayRange,
) -> Result<Vec<Room>, PersistenceError> {
    let occupied: Vec<i64> = occupied_room_numbers(conn, stay)?;
    debug!(stay = %stay, occupied = occupied.len(), "Computing available rooms");

    let rows: Vec<RoomRow> = rooms::table
        .filter(rooms::room_number.ne_all(occupied))
        .order(rooms::room_number.asc())
        .select(RoomRow::as_select())
        .load(conn)?;
    convert_all(rows, RoomRow::into_domain)
}

/// Counts bookings (of any status) for one room.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_bookings_by_room(
    conn: &mut SqliteConnection,
    room_number: i64,
) -> Result<i64, PersistenceError> {
    Ok(bookings::table
        .filter(bookings::room_number.eq(room_number))
        .count()
        .get_result(conn)?)
}
