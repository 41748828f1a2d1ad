// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hotel_desk::TransitionResult;
use hotel_desk_domain::{Booking, BookingStatus};
use tracing::{info, warn};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewBookingRow, flag};
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;
use crate::mutations::rooms::set_room_availability;
use crate::queries::bookings::{find_overlapping_booking_id, get_booking};

/// Fails if a room-blocking booking other than `booking` overlaps its stay.
fn ensure_no_overlap(
    conn: &mut SqliteConnection,
    booking: &Booking,
) -> Result<(), PersistenceError> {
    if !booking.status.blocks_room() {
        return Ok(());
    }
    if let Some(conflicting_booking_id) =
        find_overlapping_booking_id(conn, booking.room_number, &booking.stay, booking.booking_id)?
    {
        warn!(
            room_number = booking.room_number,
            conflicting_booking_id, "Rejected overlapping booking"
        );
        return Err(PersistenceError::OverlappingBooking {
            room_number: booking.room_number,
            conflicting_booking_id,
        });
    }
    Ok(())
}

/// Inserts a booking and returns its ID.
///
/// The overlap predicate is evaluated again inside an immediate
/// transaction, so two writers cannot both take the same nights. A booking
/// stored as checked in marks its room unavailable in the same transaction.
///
/// # Errors
///
/// Returns `PersistenceError::OverlappingBooking` if the room is taken, a
/// foreign key error if the guest or room does not exist, or a database
/// error if the insert fails.
pub fn insert_booking(
    conn: &mut SqliteConnection,
    booking: &Booking,
) -> Result<i64, PersistenceError> {
    let row: NewBookingRow<'_> = NewBookingRow::from_domain(booking)?;

    conn.immediate_transaction(|conn| {
        ensure_no_overlap(conn, booking)?;

        diesel::insert_into(bookings::table)
            .values(row)
            .execute(conn)?;

        let booking_id: i64 = conn.get_last_insert_rowid()?;
        if booking.status == BookingStatus::CheckedIn {
            set_room_availability(conn, booking.room_number, false)?;
        }
        info!(
            booking_id,
            guest_id = booking.guest_id,
            room_number = booking.room_number,
            stay = %booking.stay,
            total_price = %booking.total_price,
            "Created booking"
        );
        Ok(booking_id)
    })
}

/// Overwrites the stored booking with `booking`.
///
/// If a checked-in booking moves to another room, the old room is marked
/// available and the new one unavailable in the same transaction.
///
/// # Errors
///
/// Returns `PersistenceError::BookingNotFound` if it does not exist,
/// `PersistenceError::OverlappingBooking` if the new stay is taken, or a
/// database error if the update fails.
pub fn update_booking(
    conn: &mut SqliteConnection,
    booking: &Booking,
) -> Result<(), PersistenceError> {
    let booking_id: i64 = booking.booking_id.ok_or_else(|| {
        PersistenceError::NotFound(String::from("cannot update a booking without an ID"))
    })?;
    let row: NewBookingRow<'_> = NewBookingRow::from_domain(booking)?;

    conn.immediate_transaction(|conn| {
        let stored: Booking =
            get_booking(conn, booking_id)?.ok_or(PersistenceError::BookingNotFound(booking_id))?;

        ensure_no_overlap(conn, booking)?;

        diesel::update(bookings::table.filter(bookings::booking_id.eq(booking_id)))
            .set((
                bookings::guest_id.eq(row.guest_id),
                bookings::room_number.eq(row.room_number),
                bookings::check_in_date.eq(&row.check_in_date),
                bookings::check_out_date.eq(&row.check_out_date),
                bookings::number_of_guests.eq(row.number_of_guests),
                bookings::total_price_cents.eq(row.total_price_cents),
                bookings::status.eq(row.status),
                bookings::is_paid.eq(row.is_paid),
                bookings::payment_method.eq(row.payment_method),
            ))
            .execute(conn)?;

        if stored.status == BookingStatus::CheckedIn && stored.room_number != booking.room_number {
            set_room_availability(conn, stored.room_number, true)?;
            set_room_availability(conn, booking.room_number, false)?;
        }

        info!(booking_id, stay = %booking.stay, "Updated booking");
        Ok(())
    })
}

/// Deletes a booking.
///
/// Deleting a checked-in booking frees its room.
///
/// # Errors
///
/// Returns `PersistenceError::BookingNotFound` if it does not exist.
pub fn delete_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        let stored: Booking =
            get_booking(conn, booking_id)?.ok_or(PersistenceError::BookingNotFound(booking_id))?;

        diesel::delete(bookings::table.filter(bookings::booking_id.eq(booking_id))).execute(conn)?;

        if stored.status == BookingStatus::CheckedIn {
            set_room_availability(conn, stored.room_number, true)?;
        }

        info!(booking_id, "Deleted booking");
        Ok(())
    })
}

/// Persists a status or payment transition and its room effect atomically.
///
/// # Errors
///
/// Returns `PersistenceError::BookingNotFound` if the booking does not
/// exist, or a database error if either write fails.
pub fn apply_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<(), PersistenceError> {
    let booking: &Booking = &result.booking;
    let booking_id: i64 = booking.booking_id.ok_or_else(|| {
        PersistenceError::NotFound(String::from("cannot transition a booking without an ID"))
    })?;

    conn.transaction(|conn| {
        let updated: usize =
            diesel::update(bookings::table.filter(bookings::booking_id.eq(booking_id)))
                .set((
                    bookings::status.eq(booking.status.as_str()),
                    bookings::is_paid.eq(flag(booking.is_paid)),
                    bookings::payment_method.eq(booking.payment_method.as_deref()),
                ))
                .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::BookingNotFound(booking_id));
        }

        if let Some(effect) = result.room_effect {
            set_room_availability(conn, booking.room_number, effect.is_available())?;
        }

        info!(
            booking_id,
            from = %result.previous_status,
            to = %booking.status,
            is_paid = booking.is_paid,
            "Applied booking transition"
        );
        Ok(())
    })
}
