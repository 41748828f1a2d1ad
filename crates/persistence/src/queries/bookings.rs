// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hotel_desk_domain::{Booking, BookingStatus, StayRange};
use time::Date;
use tracing::debug;

use crate::data_models::{BookingDetails, BookingRow, GuestRow, RoomRow, convert_all};
use crate::diesel_schema::{bookings, guests, rooms};
use crate::error::PersistenceError;

/// Retrieves a booking by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the booking is not found.
pub fn get_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Option<Booking>, PersistenceError> {
    debug!(booking_id, "Looking up booking");

    bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .select(BookingRow::as_select())
        .first(conn)
        .optional()?
        .map(BookingRow::into_domain)
        .transpose()
}

/// Retrieves a booking joined with its guest and room.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the booking is not found.
pub fn get_booking_details(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Option<BookingDetails>, PersistenceError> {
    debug!(booking_id, "Looking up booking details");

    let row: Option<(BookingRow, GuestRow, RoomRow)> = bookings::table
        .inner_join(guests::table)
        .inner_join(rooms::table)
        .filter(bookings::booking_id.eq(booking_id))
        .select((
            BookingRow::as_select(),
            GuestRow::as_select(),
            RoomRow::as_select(),
        ))
        .first(conn)
        .optional()?;

    row.map(|(booking, guest, room)| -> Result<BookingDetails, PersistenceError> {
        Ok(BookingDetails {
            booking: booking.into_domain()?,
            guest: guest.into_domain()?,
            room: room.into_domain()?,
        })
    })
    .transpose()
}

/// Lists all bookings ordered by check-in date, then ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_bookings(conn: &mut SqliteConnection) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .order((bookings::check_in_date.asc(), bookings::booking_id.asc()))
        .select(BookingRow::as_select())
        .load(conn)?;
    convert_all(rows, BookingRow::into_domain)
}

/// Lists the room-blocking (not cancelled) bookings for a room.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_bookings_for_room(
    conn: &mut SqliteConnection,
    room_number: i64,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::room_number.eq(room_number))
        .filter(bookings::status.ne(BookingStatus::Cancelled.as_str()))
        .order((bookings::check_in_date.asc(), bookings::booking_id.asc()))
        .select(BookingRow::as_select())
        .load(conn)?;
    convert_all(rows, BookingRow::into_domain)
}

/// Finds a room-blocking booking for `room_number` that overlaps `stay`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_overlapping_booking_id(
    conn: &mut SqliteConnection,
    room_number: i64,
    stay: &StayRange,
    exclude_booking_id: Option<i64>,
) -> Result<Option<i64>, PersistenceError> {
    let mut statement = bookings::table
        .filter(bookings::room_number.eq(room_number))
        .filter(bookings::status.ne(BookingStatus::Cancelled.as_str()))
        .filter(bookings::check_in_date.lt(stay.check_out().to_string()))
        .filter(bookings::check_out_date.gt(stay.check_in().to_string()))
        .select(bookings::booking_id)
        .into_boxed();

    if let Some(excluded) = exclude_booking_id {
        statement = statement.filter(bookings::booking_id.ne(excluded));
    }

    Ok(statement.first(conn).optional()?)
}

/// Lists bookings whose stay touches `[start, end]`.
///
/// Selects `check_in_date <= end AND check_out_date >= start`, ordered by
/// check-in date. An inverted range yields no bookings.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_bookings_in_range(
    conn: &mut SqliteConnection,
    start: Date,
    end: Date,
) -> Result<Vec<Booking>, PersistenceError> {
    if start > end {
        return Ok(Vec::new());
    }

    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::check_in_date.le(end.to_string()))
        .filter(bookings::check_out_date.ge(start.to_string()))
        .order((bookings::check_in_date.asc(), bookings::booking_id.asc()))
        .select(BookingRow::as_select())
        .load(conn)?;
    convert_all(rows, BookingRow::into_domain)
}

/// Lists bookings in one status ordered by check-in date.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_bookings_by_status(
    conn: &mut SqliteConnection,
    status: BookingStatus,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::status.eq(status.as_str()))
        .order((bookings::check_in_date.asc(), bookings::booking_id.asc()))
        .select(BookingRow::as_select())
        .load(conn)?;
    convert_all(rows, BookingRow::into_domain)
}

/// Lists a guest's bookings, most recent check-in first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_bookings_for_guest(
    conn: &mut SqliteConnection,
    guest_id: i64,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::guest_id.eq(guest_id))
        .order((bookings::check_in_date.desc(), bookings::booking_id.desc()))
        .select(BookingRow::as_select())
        .load(conn)?;
    convert_all(rows, BookingRow::into_domain)
}
