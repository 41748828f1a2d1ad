// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guest mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hotel_desk_domain::Guest;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::NewGuestRow;
use crate::diesel_schema::guests;
use crate::error::PersistenceError;
use crate::queries::guests::{count_bookings_by_guest, email_in_use};

/// Inserts a guest and returns its ID.
///
/// If `guest.guest_id` is set (bulk import), that ID is used.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateEmail` if the email is taken, or a
/// database error if the insert fails.
pub fn insert_guest(conn: &mut SqliteConnection, guest: &Guest) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        if email_in_use(conn, &guest.email, None)? {
            return Err(PersistenceError::DuplicateEmail(guest.email.clone()));
        }

        diesel::insert_into(guests::table)
            .values(NewGuestRow::from(guest))
            .execute(conn)?;

        let guest_id: i64 = conn.get_last_insert_rowid()?;
        info!(guest_id, email = %guest.email, "Created guest");
        Ok(guest_id)
    })
}

/// Overwrites every field of a stored guest.
///
/// # Errors
///
/// Returns an error if the guest has no ID or does not exist, if another
/// guest already uses the email, or if the update fails.
pub fn update_guest(conn: &mut SqliteConnection, guest: &Guest) -> Result<(), PersistenceError> {
    let guest_id: i64 = guest.guest_id.ok_or_else(|| {
        PersistenceError::NotFound(String::from("cannot update a guest without an ID"))
    })?;

    conn.transaction(|conn| {
        if email_in_use(conn, &guest.email, Some(guest_id))? {
            return Err(PersistenceError::DuplicateEmail(guest.email.clone()));
        }

        let updated: usize = diesel::update(guests::table.filter(guests::guest_id.eq(guest_id)))
            .set((
                guests::first_name.eq(&guest.first_name),
                guests::last_name.eq(&guest.last_name),
                guests::email.eq(&guest.email),
                guests::phone.eq(&guest.phone),
                guests::loyalty_points.eq(i64::from(guest.loyalty_points)),
                guests::nationality.eq(&guest.nationality),
            ))
            .execute(conn)?;

        if updated == 0 {
            return Err(PersistenceError::GuestNotFound(guest_id));
        }
        info!(guest_id, "Updated guest");
        Ok(())
    })
}

/// Deletes a guest that has no bookings.
///
/// # Errors
///
/// Returns `PersistenceError::GuestHasBookings` if bookings reference the
/// guest, or `PersistenceError::GuestNotFound` if it does not exist.
pub fn delete_guest(conn: &mut SqliteConnection, guest_id: i64) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        let booking_count: i64 = count_bookings_by_guest(conn, guest_id)?;
        if booking_count > 0 {
            return Err(PersistenceError::GuestHasBookings {
                guest_id,
                booking_count,
            });
        }

        let deleted: usize =
            diesel::delete(guests::table.filter(guests::guest_id.eq(guest_id))).execute(conn)?;
        if deleted == 0 {
            return Err(PersistenceError::GuestNotFound(guest_id));
        }

        info!(guest_id, "Deleted guest");
        Ok(())
    })
}
