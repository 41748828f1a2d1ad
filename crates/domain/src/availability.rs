// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking::Booking;
use crate::error::DomainError;
use crate::stay::StayRange;

/// Finds the first booking that holds `room_number` for a night of `stay`.
///
/// Cancelled bookings never hold a room. When updating an existing booking,
/// pass its ID as `exclude_booking_id` so it does not conflict with itself.
///
/// # Arguments
///
/// * `room_number` - The room being requested
/// * `stay` - The requested stay
/// * `existing` - Bookings already on record (any room)
/// * `exclude_booking_id` - A booking to ignore, if any
#[must_use]
pub fn find_conflict<'a>(
    room_number: i64,
    stay: &StayRange,
    existing: &'a [Booking],
    exclude_booking_id: Option<i64>,
) -> Option<&'a Booking> {
    existing.iter().find(|booking| {
        booking.room_number == room_number
            && booking.status.blocks_room()
            && (exclude_booking_id.is_none() || booking.booking_id != exclude_booking_id)
            && booking.stay.overlaps(stay)
    })
}

/// Fails with `DomainError::RoomUnavailable` if the room is taken for `stay`.
///
/// # Errors
///
/// Returns `DomainError::RoomUnavailable` naming the conflicting booking.
pub fn ensure_room_free(
    room_number: i64,
    stay: &StayRange,
    existing: &[Booking],
    exclude_booking_id: Option<i64>,
) -> Result<(), DomainError> {
    match find_conflict(room_number, stay, existing, exclude_booking_id) {
        Some(conflict) => Err(DomainError::RoomUnavailable {
            room_number,
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            conflicting_booking_id: conflict.booking_id,
        }),
        None => Ok(()),
    }
}
