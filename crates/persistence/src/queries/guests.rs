// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guest queries.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::dsl::count;
use diesel::prelude::*;
use hotel_desk_domain::Guest;
use tracing::debug;

use crate::data_models::{GuestRow, convert_all};
use crate::diesel_schema::{bookings, guests};
use crate::error::PersistenceError;

/// Retrieves a guest by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the guest is not found.
pub fn get_guest(
    conn: &mut SqliteConnection,
    guest_id: i64,
) -> Result<Option<Guest>, PersistenceError> {
    debug!(guest_id, "Looking up guest");

    guests::table
        .filter(guests::guest_id.eq(guest_id))
        .select(GuestRow::as_select())
        .first(conn)
        .optional()?
        .map(GuestRow::into_domain)
        .transpose()
}

/// Lists all guests ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_guests(conn: &mut SqliteConnection) -> Result<Vec<Guest>, PersistenceError> {
    let rows: Vec<GuestRow> = guests::table
        .order(guests::guest_id.asc())
        .select(GuestRow::as_select())
        .load(conn)?;
    convert_all(rows, GuestRow::into_domain)
}

/// Retrieves a guest by email. Matching ignores case and surrounding space.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_guest_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<Guest>, PersistenceError> {
    let normalized_email: String = email.trim().to_lowercase();
    debug!("Looking up guest by email: {}", normalized_email);

    guests::table
        .filter(guests::email.eq(&normalized_email))
        .select(GuestRow::as_select())
        .first(conn)
        .optional()?
        .map(GuestRow::into_domain)
        .transpose()
}

/// Checks whether a guest other than `exclude_guest_id` uses `email`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn email_in_use(
    conn: &mut SqliteConnection,
    email: &str,
    exclude_guest_id: Option<i64>,
) -> Result<bool, PersistenceError> {
    let matches: Vec<i64> = guests::table
        .filter(guests::email.eq(email.trim().to_lowercase()))
        .select(guests::guest_id)
        .load(conn)?;
    Ok(matches.iter().any(|id| Some(*id) != exclude_guest_id))
}

/// Escapes `LIKE` wildcards so user input matches literally.
fn like_pattern(query: &str) -> String {
    let mut escaped: String = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Finds guests whose first or last name contains `query`.
///
/// Matching is case-insensitive (`SQLite` `LIKE` folds ASCII case). Results
/// are ordered by last name, then first name. A blank query returns every
/// guest in that order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_guests_by_name(
    conn: &mut SqliteConnection,
    query: &str,
) -> Result<Vec<Guest>, PersistenceError> {
    let trimmed: &str = query.trim();
    debug!("Searching guests by name: '{}'", trimmed);

    let mut statement = guests::table
        .order((guests::last_name.asc(), guests::first_name.asc(), guests::guest_id.asc()))
        .select(GuestRow::as_select())
        .into_boxed();

    if !trimmed.is_empty() {
        let pattern: String = like_pattern(trimmed);
        statement = statement.filter(
            guests::first_name
                .like(pattern.clone())
                .escape('\\')
                .or(guests::last_name.like(pattern).escape('\\')),
        );
    }

    let rows: Vec<GuestRow> = statement.load(conn)?;
    convert_all(rows, GuestRow::into_domain)
}

/// Counts bookings (of any status) per guest.
///
/// Guests with no bookings are absent from the map.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn booking_counts_by_guest(
    conn: &mut SqliteConnection,
) -> Result<HashMap<i64, i64>, PersistenceError> {
    let rows: Vec<(i64, i64)> = bookings::table
        .group_by(bookings::guest_id)
        .select((bookings::guest_id, count(bookings::booking_id)))
        .load(conn)?;
    Ok(rows.into_iter().collect())
}

/// Counts bookings (of any status) for one guest.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_bookings_by_guest(
    conn: &mut SqliteConnection,
    guest_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(bookings::table
        .filter(bookings::guest_id.eq(guest_id))
        .count()
        .get_result(conn)?)
}

/// Lists VIP guests, highest loyalty balance first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_vip_guests(conn: &mut SqliteConnection) -> Result<Vec<Guest>, PersistenceError> {
    let counts: HashMap<i64, i64> = booking_counts_by_guest(conn)?;

    let mut vips: Vec<Guest> = list_guests(conn)?
        .into_iter()
        .filter(|guest| {
            let booking_count: i64 = guest
                .guest_id
                .and_then(|id| counts.get(&id).copied())
                .unwrap_or(0);
            guest.is_vip(usize::try_from(booking_count).unwrap_or(usize::MAX))
        })
        .collect();
    vips.sort_by(|a, b| {
        b.loyalty_points
            .cmp(&a.loyalty_points)
            .then(a.guest_id.cmp(&b.guest_id))
    });

    debug!(count = vips.len(), "Loaded VIP guests");
    Ok(vips)
}
