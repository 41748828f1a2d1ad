// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{BookingRequest, Command};
use crate::error::CoreError;
use crate::state::{RoomEffect, TransitionResult};
use hotel_desk_domain::{
    Booking, BookingStatus, DomainError, Guest, Money, Room, ensure_room_free, validate_party_size,
};
use time::Date;

/// Checks that the loaded guest and room are the ones the request names.
fn check_request_targets(
    request: &BookingRequest,
    guest: Option<&Guest>,
    room: &Room,
) -> Result<(), CoreError> {
    if room.room_number != request.room_number {
        return Err(CoreError::Internal(format!(
            "request is for room {} but room {} was supplied",
            request.room_number, room.room_number
        )));
    }
    match guest {
        Some(guest) if guest.guest_id != Some(request.guest_id) => {
            Err(CoreError::Internal(format!(
                "request is for guest {} but guest {:?} was supplied",
                request.guest_id, guest.guest_id
            )))
        }
        _ => Ok(()),
    }
}

/// Plans a new booking.
///
/// This is a pure function: it validates the request against the room and
/// the bookings already holding that room, and returns the booking to insert.
///
/// # Arguments
///
/// * `request` - The booking request
/// * `guest` - The guest named by the request
/// * `room` - The room named by the request
/// * `room_bookings` - Existing bookings for the room
///
/// # Returns
///
/// * `Ok(Booking)` with no ID, status `Confirmed`, unpaid, and the total
///   price for the stay
/// * `Err(CoreError)` if the request is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The party is empty or does not fit the room
/// - Another booking holds the room for any night of the stay
/// - The total price overflows
pub fn plan_booking(
    request: &BookingRequest,
    guest: &Guest,
    room: &Room,
    room_bookings: &[Booking],
) -> Result<Booking, CoreError> {
    check_request_targets(request, Some(guest), room)?;
    validate_party_size(room, request.number_of_guests)?;
    ensure_room_free(request.room_number, &request.stay, room_bookings, None)?;

    let total_price: Money = room.price_for_stay(&request.stay)?;

    Ok(Booking {
        booking_id: None,
        guest_id: request.guest_id,
        room_number: request.room_number,
        stay: request.stay,
        number_of_guests: request.number_of_guests,
        total_price,
        status: BookingStatus::Confirmed,
        is_paid: false,
        payment_method: None,
    })
}

/// Changes the guest, room, stay, or party size of an existing booking.
///
/// When the stay or the room changes, availability is checked again (the
/// booking never conflicts with itself) and the total price is recalculated
/// at `room`'s current rate. Otherwise the recorded price is kept.
///
/// # Arguments
///
/// * `booking` - The booking as currently stored
/// * `request` - The desired details
/// * `room` - The room named by the request
/// * `room_bookings` - Existing bookings for that room
///
/// # Errors
///
/// Returns an error if:
/// - The booking is checked out or cancelled
/// - The party is empty or does not fit the room
/// - Another booking holds the room for any night of the new stay
pub fn reschedule_booking(
    booking: &Booking,
    request: &BookingRequest,
    room: &Room,
    room_bookings: &[Booking],
) -> Result<Booking, CoreError> {
    if booking.status.is_terminal() {
        return Err(CoreError::DomainViolation(DomainError::BookingClosed {
            booking_id: booking.booking_id,
            status: booking.status.label().to_string(),
        }));
    }
    check_request_targets(request, None, room)?;
    validate_party_size(room, request.number_of_guests)?;

    let mut updated: Booking = booking.clone();
    updated.guest_id = request.guest_id;
    updated.number_of_guests = request.number_of_guests;

    let stay_changed: bool =
        request.stay != booking.stay || request.room_number != booking.room_number;
    if stay_changed {
        ensure_room_free(
            request.room_number,
            &request.stay,
            room_bookings,
            booking.booking_id,
        )?;
        updated.room_number = request.room_number;
        updated.stay = request.stay;
        updated.total_price = room.price_for_stay(&request.stay)?;
    }

    Ok(updated)
}

/// Applies a command to a booking, producing the updated booking.
///
/// This is a pure function: the input booking is not modified.
///
/// # Arguments
///
/// * `booking` - The booking as currently stored
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the updated booking and room effect
/// * `Err(CoreError)` if the command is not allowed
///
/// # Errors
///
/// Returns an error if:
/// - Check-in is attempted before the check-in date or on a booking that is
///   not `Confirmed`
/// - Check-out is attempted on a booking that is not `CheckedIn`
/// - Cancellation is attempted after check-in, after check-out, or twice
/// - A payment is recorded without a method
pub fn apply(booking: &Booking, command: Command) -> Result<TransitionResult, CoreError> {
    let previous_status: BookingStatus = booking.status;
    let check_in: Date = booking.stay.check_in();
    let mut updated: Booking = booking.clone();

    let room_effect: Option<RoomEffect> = match command {
        Command::CheckIn { today } => {
            previous_status.validate_transition(BookingStatus::CheckedIn, check_in, today)?;
            updated.status = BookingStatus::CheckedIn;
            Some(RoomEffect::MarkUnavailable)
        }
        Command::CheckOut => {
            previous_status.validate_transition(BookingStatus::CheckedOut, check_in, check_in)?;
            updated.status = BookingStatus::CheckedOut;
            Some(RoomEffect::MarkAvailable)
        }
        Command::Cancel => {
            previous_status.validate_transition(BookingStatus::Cancelled, check_in, check_in)?;
            updated.status = BookingStatus::Cancelled;
            // A confirmed booking never cleared the flag; another guest may hold the room.
            None
        }
        Command::RecordPayment { method } => {
            let method: &str = method.trim();
            if method.is_empty() {
                return Err(CoreError::DomainViolation(DomainError::EmptyPaymentMethod));
            }
            updated.is_paid = true;
            updated.payment_method = Some(method.to_string());
            None
        }
    };

    Ok(TransitionResult {
        booking: updated,
        previous_status,
        room_effect,
    })
}
