// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations for guests, rooms and bookings.
//!
//! Every operation takes the persistence layer explicitly, parses its
//! string-typed request into domain values, runs the core rules, persists
//! the result and returns a response DTO.

use hotel_desk::{
    BookingRequest, Command, RoomEffect, TransitionResult, apply, plan_booking,
    reschedule_booking,
};
use hotel_desk_domain::{
    Booking, BookingStatus, Guest, Money, Room, RoomStatus, RoomType, StayRange,
    bookings_checking_in_between, filter_bookings_by_status, filter_rooms_by_status,
    filter_rooms_by_type, parse_date, sort_rooms_by_price, validate_guest_fields,
    validate_room_fields,
};
use hotel_desk_persistence::{BookingDetails, Persistence};
use time::Date;
use tracing::{debug, info, warn};

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    ArrivalsRequest, AvailableRoomsRequest, BookingDetailsResponse, BookingInfo,
    BookingRequestBody, BookingTransitionResponse, CreateRoomRequest, GuestHistoryResponse,
    GuestInfo, GuestRequest, ListBookingsRequest, ListBookingsResponse, ListGuestsResponse,
    ListRoomsRequest, ListRoomsResponse, PriceRangeRequest, RecordPaymentRequest, RoomInfo,
    SetAvailabilityRequest, UpdateRoomRequest,
};

// ============================================================================
// Shared lookups
// ============================================================================

fn load_guest(persistence: &mut Persistence, guest_id: i64) -> Result<Guest, ApiError> {
    persistence
        .get_guest(guest_id)?
        .ok_or_else(|| ApiError::not_found("Guest", format!("Guest {guest_id} does not exist")))
}

fn load_room(persistence: &mut Persistence, room_number: i64) -> Result<Room, ApiError> {
    persistence
        .get_room(room_number)?
        .ok_or_else(|| ApiError::not_found("Room", format!("Room {room_number} does not exist")))
}

fn load_booking(persistence: &mut Persistence, booking_id: i64) -> Result<Booking, ApiError> {
    persistence.get_booking(booking_id)?.ok_or_else(|| {
        ApiError::not_found("Booking", format!("Booking {booking_id} does not exist"))
    })
}

fn parse_field_date(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|e| ApiError::invalid_input(field, e.to_string()))
}

fn parse_field_money(field: &str, value: &str) -> Result<Money, ApiError> {
    Money::parse(value).map_err(|e| ApiError::invalid_input(field, e.to_string()))
}

fn guest_infos(guests: &[Guest]) -> ListGuestsResponse {
    ListGuestsResponse {
        guests: guests.iter().map(GuestInfo::from_guest).collect(),
    }
}

fn room_infos(rooms: &[Room]) -> ListRoomsResponse {
    ListRoomsResponse {
        rooms: rooms.iter().map(RoomInfo::from_room).collect(),
    }
}

fn booking_infos(bookings: &[Booking]) -> ListBookingsResponse {
    ListBookingsResponse {
        bookings: bookings.iter().map(BookingInfo::from_booking).collect(),
    }
}

fn guest_from_request(request: &GuestRequest) -> Result<Guest, ApiError> {
    let guest: Guest = Guest::new(
        &request.first_name,
        &request.last_name,
        &request.email,
        &request.phone,
        request.loyalty_points,
        &request.nationality,
    );
    validate_guest_fields(&guest).map_err(translate_domain_error)?;
    Ok(guest)
}

// ============================================================================
// Guests
// ============================================================================

/// Registers a new guest.
///
/// # Errors
///
/// Returns an error if:
/// - A name is empty or the email is malformed
/// - Another guest already uses the email
pub fn create_guest(
    persistence: &mut Persistence,
    request: &GuestRequest,
) -> Result<GuestInfo, ApiError> {
    let guest: Guest = guest_from_request(request)?;
    let guest_id: i64 = persistence.create_guest(&guest)?;
    info!(guest_id, email = %guest.email, "Created guest");
    Ok(GuestInfo::from_guest(&guest.with_id(guest_id)))
}

/// Returns one guest.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the guest does not exist.
pub fn get_guest(persistence: &mut Persistence, guest_id: i64) -> Result<GuestInfo, ApiError> {
    let guest: Guest = load_guest(persistence, guest_id)?;
    Ok(GuestInfo::from_guest(&guest))
}

/// Lists every guest ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_guests(persistence: &mut Persistence) -> Result<ListGuestsResponse, ApiError> {
    let guests: Vec<Guest> = persistence.list_guests()?;
    Ok(guest_infos(&guests))
}

/// Replaces a guest's details.
///
/// # Errors
///
/// Returns an error if:
/// - The guest does not exist
/// - A field is invalid
/// - The new email belongs to another guest
pub fn update_guest(
    persistence: &mut Persistence,
    guest_id: i64,
    request: &GuestRequest,
) -> Result<GuestInfo, ApiError> {
    let guest: Guest = guest_from_request(request)?.with_id(guest_id);
    persistence.update_guest(&guest)?;
    info!(guest_id, "Updated guest");
    Ok(GuestInfo::from_guest(&guest))
}

/// Deletes a guest with no bookings.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown guest and `Conflict` if
/// bookings still reference the guest.
pub fn delete_guest(persistence: &mut Persistence, guest_id: i64) -> Result<(), ApiError> {
    persistence.delete_guest(guest_id).inspect_err(|e| {
        warn!(guest_id, error = %e, "Guest deletion rejected");
    })?;
    info!(guest_id, "Deleted guest");
    Ok(())
}

/// Case-insensitive substring search on first or last name.
///
/// A blank query lists every guest.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_guests(
    persistence: &mut Persistence,
    query: &str,
) -> Result<ListGuestsResponse, ApiError> {
    let guests: Vec<Guest> = persistence.search_guests_by_name(query)?;
    debug!(query, matches = guests.len(), "Guest name search");
    Ok(guest_infos(&guests))
}

/// Lists VIP guests, highest loyalty balance first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_vip_guests(persistence: &mut Persistence) -> Result<ListGuestsResponse, ApiError> {
    let guests: Vec<Guest> = persistence.list_vip_guests()?;
    Ok(guest_infos(&guests))
}

/// Looks a guest up by email (case-insensitive).
///
/// # Errors
///
/// Returns `ResourceNotFound` if no guest uses the email.
pub fn find_guest_by_email(
    persistence: &mut Persistence,
    email: &str,
) -> Result<GuestInfo, ApiError> {
    persistence
        .find_guest_by_email(email)?
        .map(|g| GuestInfo::from_guest(&g))
        .ok_or_else(|| ApiError::not_found("Guest", format!("No guest with email '{email}'")))
}

/// Returns a guest together with their bookings and stay totals.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the guest does not exist, or `Internal`
/// if the spend total overflows.
pub fn get_guest_history(
    persistence: &mut Persistence,
    guest_id: i64,
) -> Result<GuestHistoryResponse, ApiError> {
    let guest: Guest = load_guest(persistence, guest_id)?;
    let bookings: Vec<Booking> = persistence.list_bookings_for_guest(guest_id)?;

    let spent_cents: i64 = bookings
        .iter()
        .filter(|b| b.status != BookingStatus::Cancelled)
        .try_fold(0_i64, |acc, b| acc.checked_add(b.total_price.cents()))
        .ok_or_else(|| ApiError::Internal {
            message: format!("Spend total for guest {guest_id} overflowed"),
        })?;

    Ok(GuestHistoryResponse {
        guest: GuestInfo::from_guest(&guest),
        total_nights: guest.total_nights(&bookings),
        total_spent: Money::from_cents(spent_cents).to_string(),
        is_vip: guest.is_vip(bookings.len()),
        bookings: booking_infos(&bookings).bookings,
    })
}

// ============================================================================
// Rooms
// ============================================================================

#[allow(clippy::too_many_arguments)]
fn build_room(
    room_number: i64,
    room_type: &str,
    price_per_night: &str,
    max_occupancy: u32,
    has_balcony: bool,
    amenities: &[String],
    is_available: bool,
    status: &str,
) -> Result<Room, ApiError> {
    let room_type: RoomType = room_type.parse().map_err(translate_domain_error)?;
    let price: Money = parse_field_money("price_per_night", price_per_night)?;
    let status: RoomStatus = status.parse().map_err(translate_domain_error)?;

    let mut room: Room = Room::new(room_number, room_type, price, max_occupancy, has_balcony);
    for item in amenities {
        room.add_amenity(item);
    }
    room.is_available = is_available;
    room.status = status;

    validate_room_fields(&room).map_err(translate_domain_error)?;
    Ok(room)
}

/// Adds a room to the inventory.
///
/// # Errors
///
/// Returns an error if:
/// - The type, price or status cannot be parsed
/// - The room number or occupancy is out of range
/// - The room number is already taken
pub fn create_room(
    persistence: &mut Persistence,
    request: &CreateRoomRequest,
) -> Result<RoomInfo, ApiError> {
    let room: Room = build_room(
        request.room_number,
        &request.room_type,
        &request.price_per_night,
        request.max_occupancy,
        request.has_balcony,
        &request.amenities,
        true,
        request.status.as_deref().unwrap_or(RoomStatus::Clean.as_str()),
    )?;
    persistence.create_room(&room)?;
    info!(room_number = room.room_number, room_type = room.room_type.as_str(), "Created room");
    Ok(RoomInfo::from_room(&room))
}

/// Returns one room.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the room does not exist.
pub fn get_room(persistence: &mut Persistence, room_number: i64) -> Result<RoomInfo, ApiError> {
    let room: Room = load_room(persistence, room_number)?;
    Ok(RoomInfo::from_room(&room))
}

/// Lists rooms, optionally filtered by type and status and sorted by price.
///
/// # Errors
///
/// Returns an error if a filter value cannot be parsed or the query fails.
pub fn list_rooms(
    persistence: &mut Persistence,
    request: &ListRoomsRequest,
) -> Result<ListRoomsResponse, ApiError> {
    let mut rooms: Vec<Room> = persistence.list_rooms()?;

    if let Some(value) = request.room_type.as_deref() {
        let room_type: RoomType = value.parse().map_err(translate_domain_error)?;
        rooms = filter_rooms_by_type(&rooms, room_type);
    }
    if let Some(value) = request.status.as_deref() {
        let status: RoomStatus = value.parse().map_err(translate_domain_error)?;
        rooms = filter_rooms_by_status(&rooms, status);
    }
    if request.sort_by_price {
        sort_rooms_by_price(&mut rooms);
    }

    Ok(room_infos(&rooms))
}

/// Replaces a room's attributes. The room number cannot change.
///
/// # Errors
///
/// Returns an error if a field is invalid or the room does not exist.
pub fn update_room(
    persistence: &mut Persistence,
    room_number: i64,
    request: &UpdateRoomRequest,
) -> Result<RoomInfo, ApiError> {
    let room: Room = build_room(
        room_number,
        &request.room_type,
        &request.price_per_night,
        request.max_occupancy,
        request.has_balcony,
        &request.amenities,
        request.is_available,
        &request.status,
    )?;
    persistence.update_room(&room)?;
    info!(room_number, "Updated room");
    Ok(RoomInfo::from_room(&room))
}

/// Sets a room's availability flag.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the room does not exist.
pub fn set_room_availability(
    persistence: &mut Persistence,
    room_number: i64,
    request: &SetAvailabilityRequest,
) -> Result<RoomInfo, ApiError> {
    persistence.set_room_availability(room_number, request.is_available)?;
    info!(room_number, is_available = request.is_available, "Set room availability");
    get_room(persistence, room_number)
}

/// Deletes a room with no bookings.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown room and `Conflict` if
/// bookings still reference it.
pub fn delete_room(persistence: &mut Persistence, room_number: i64) -> Result<(), ApiError> {
    persistence.delete_room(room_number).inspect_err(|e| {
        warn!(room_number, error = %e, "Room deletion rejected");
    })?;
    info!(room_number, "Deleted room");
    Ok(())
}

/// Lists rooms with no active booking overlapping the requested stay.
///
/// # Errors
///
/// Returns `InvalidInput` for unparseable dates or a check-out that is not
/// after check-in.
pub fn list_available_rooms(
    persistence: &mut Persistence,
    request: &AvailableRoomsRequest,
) -> Result<ListRoomsResponse, ApiError> {
    let stay: StayRange = StayRange::parse(&request.check_in_date, &request.check_out_date)
        .map_err(translate_domain_error)?;
    let mut rooms: Vec<Room> = persistence.list_available_rooms(&stay)?;
    if let Some(guests) = request.number_of_guests {
        rooms.retain(|r| r.can_accommodate(guests));
    }
    debug!(%stay, available = rooms.len(), "Available room search");
    Ok(room_infos(&rooms))
}

/// Lists rooms whose nightly rate lies within `[min_price, max_price]`.
///
/// An inverted range yields no rooms.
///
/// # Errors
///
/// Returns `InvalidInput` if either bound is not a valid amount.
pub fn list_rooms_by_price_range(
    persistence: &mut Persistence,
    request: &PriceRangeRequest,
) -> Result<ListRoomsResponse, ApiError> {
    let min: Money = parse_field_money("min_price", &request.min_price)?;
    let max: Money = parse_field_money("max_price", &request.max_price)?;
    let rooms: Vec<Room> = persistence.list_rooms_by_price_range(min, max)?;
    Ok(room_infos(&rooms))
}

// ============================================================================
// Bookings
// ============================================================================

fn parse_booking_request(body: &BookingRequestBody) -> Result<BookingRequest, ApiError> {
    let stay: StayRange = StayRange::parse(&body.check_in_date, &body.check_out_date)
        .map_err(translate_domain_error)?;
    Ok(BookingRequest {
        guest_id: body.guest_id,
        room_number: body.room_number,
        stay,
        number_of_guests: body.number_of_guests,
    })
}

/// Reserves a room for a guest.
///
/// The total price is `nights × price_per_night` of the room.
///
/// # Errors
///
/// Returns an error if:
/// - The dates are invalid
/// - The guest or room does not exist
/// - The party is empty or does not fit the room
/// - Another active booking holds the room for an overlapping stay
pub fn create_booking(
    persistence: &mut Persistence,
    body: &BookingRequestBody,
) -> Result<BookingInfo, ApiError> {
    let request: BookingRequest = parse_booking_request(body)?;
    let guest: Guest = load_guest(persistence, request.guest_id)?;
    let room: Room = load_room(persistence, request.room_number)?;
    let room_bookings: Vec<Booking> = persistence.list_bookings_for_room(room.room_number)?;

    let mut booking: Booking =
        plan_booking(&request, &guest, &room, &room_bookings).map_err(|e| {
            warn!(room_number = request.room_number, error = %e, "Booking rejected");
            translate_core_error(e)
        })?;

    let booking_id: i64 = persistence.insert_booking(&booking)?;
    booking.booking_id = Some(booking_id);
    info!(
        booking_id,
        guest_id = booking.guest_id,
        room_number = booking.room_number,
        stay = %booking.stay,
        total = %booking.total_price,
        "Created booking"
    );
    Ok(BookingInfo::from_booking(&booking))
}

/// Returns one booking with its guest and room.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the booking does not exist.
pub fn get_booking(
    persistence: &mut Persistence,
    booking_id: i64,
) -> Result<BookingDetailsResponse, ApiError> {
    let details: BookingDetails = persistence.get_booking_details(booking_id)?.ok_or_else(|| {
        ApiError::not_found("Booking", format!("Booking {booking_id} does not exist"))
    })?;
    Ok(BookingDetailsResponse::from_details(&details))
}

/// Lists bookings, optionally by status and by stays touching a date window.
///
/// # Errors
///
/// Returns `InvalidInput` if a filter cannot be parsed or only one end of
/// the date window is given.
pub fn list_bookings(
    persistence: &mut Persistence,
    request: &ListBookingsRequest,
) -> Result<ListBookingsResponse, ApiError> {
    let mut bookings: Vec<Booking> = match (&request.start_date, &request.end_date) {
        (Some(start), Some(end)) => {
            let start: Date = parse_field_date("start_date", start)?;
            let end: Date = parse_field_date("end_date", end)?;
            persistence.list_bookings_in_range(start, end)?
        }
        (None, None) => match request.status.as_deref() {
            Some(value) => {
                let status: BookingStatus = value.parse().map_err(translate_domain_error)?;
                return Ok(booking_infos(&persistence.list_bookings_by_status(status)?));
            }
            None => persistence.list_bookings()?,
        },
        (Some(_), None) => {
            return Err(ApiError::invalid_input(
                "end_date",
                "end_date is required when start_date is given",
            ));
        }
        (None, Some(_)) => {
            return Err(ApiError::invalid_input(
                "start_date",
                "start_date is required when end_date is given",
            ));
        }
    };

    if let Some(value) = request.status.as_deref() {
        let status: BookingStatus = value.parse().map_err(translate_domain_error)?;
        bookings = filter_bookings_by_status(&bookings, status);
    }

    Ok(booking_infos(&bookings))
}

/// Lists bookings whose check-in date falls within `[start_date, end_date]`.
///
/// # Errors
///
/// Returns `InvalidInput` for unparseable dates.
pub fn list_arrivals(
    persistence: &mut Persistence,
    request: &ArrivalsRequest,
) -> Result<ListBookingsResponse, ApiError> {
    let start: Date = parse_field_date("start_date", &request.start_date)?;
    let end: Date = parse_field_date("end_date", &request.end_date)?;
    let bookings: Vec<Booking> = persistence.list_bookings()?;
    Ok(booking_infos(&bookings_checking_in_between(&bookings, start, end)))
}

/// Lists a guest's bookings, most recent stay first.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the guest does not exist.
pub fn list_bookings_for_guest(
    persistence: &mut Persistence,
    guest_id: i64,
) -> Result<ListBookingsResponse, ApiError> {
    load_guest(persistence, guest_id)?;
    let bookings: Vec<Booking> = persistence.list_bookings_for_guest(guest_id)?;
    Ok(booking_infos(&bookings))
}

/// Changes the guest, room, stay or party size of an open booking.
///
/// Availability is re-checked and the price recomputed when the stay or
/// room changes.
///
/// # Errors
///
/// Returns an error if:
/// - The booking, guest or room does not exist
/// - The booking is checked out or cancelled
/// - The new stay overlaps another active booking
/// - The party does not fit the room
pub fn update_booking(
    persistence: &mut Persistence,
    booking_id: i64,
    body: &BookingRequestBody,
) -> Result<BookingInfo, ApiError> {
    let request: BookingRequest = parse_booking_request(body)?;
    let existing: Booking = load_booking(persistence, booking_id)?;
    load_guest(persistence, request.guest_id)?;
    let room: Room = load_room(persistence, request.room_number)?;
    let room_bookings: Vec<Booking> = persistence.list_bookings_for_room(room.room_number)?;

    let updated: Booking = reschedule_booking(&existing, &request, &room, &room_bookings)
        .map_err(|e| {
            warn!(booking_id, error = %e, "Booking change rejected");
            translate_core_error(e)
        })?;

    persistence.update_booking(&updated)?;
    info!(booking_id, stay = %updated.stay, total = %updated.total_price, "Updated booking");
    Ok(BookingInfo::from_booking(&updated))
}

/// Deletes a booking outright.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the booking does not exist.
pub fn delete_booking(persistence: &mut Persistence, booking_id: i64) -> Result<(), ApiError> {
    persistence.delete_booking(booking_id)?;
    info!(booking_id, "Deleted booking");
    Ok(())
}

fn run_command(
    persistence: &mut Persistence,
    booking_id: i64,
    command: Command,
) -> Result<BookingTransitionResponse, ApiError> {
    let booking: Booking = load_booking(persistence, booking_id)?;
    let command_name: &'static str = command.name();

    let result: TransitionResult = apply(&booking, command).map_err(|e| {
        warn!(booking_id, command = command_name, error = %e, "Command rejected");
        translate_core_error(e)
    })?;

    persistence.apply_transition(&result)?;
    info!(
        booking_id,
        command = command_name,
        from = result.previous_status.as_str(),
        to = result.booking.status.as_str(),
        "Applied booking command"
    );

    Ok(BookingTransitionResponse {
        booking: BookingInfo::from_booking(&result.booking),
        previous_status: result.previous_status.label().to_string(),
        room_available: result.room_effect.map(RoomEffect::is_available),
        message: format!("{command_name} applied to booking {booking_id}"),
    })
}

/// Checks a confirmed guest in on or after their check-in date.
///
/// The room is marked unavailable.
///
/// # Errors
///
/// Returns an error if the booking does not exist, is not confirmed, or
/// `today` is before the check-in date.
pub fn check_in(
    persistence: &mut Persistence,
    booking_id: i64,
    today: Date,
) -> Result<BookingTransitionResponse, ApiError> {
    run_command(persistence, booking_id, Command::CheckIn { today })
}

/// Checks a guest out and frees the room.
///
/// # Errors
///
/// Returns an error if the booking does not exist or is not checked in.
pub fn check_out(
    persistence: &mut Persistence,
    booking_id: i64,
) -> Result<BookingTransitionResponse, ApiError> {
    run_command(persistence, booking_id, Command::CheckOut)
}

/// Cancels a confirmed booking, releasing its dates.
///
/// The room's availability flag is left as is: it tracks whoever is
/// checked in now, not future reservations.
///
/// # Errors
///
/// Returns an error if the booking does not exist or is already checked
/// in, checked out or cancelled.
pub fn cancel_booking(
    persistence: &mut Persistence,
    booking_id: i64,
) -> Result<BookingTransitionResponse, ApiError> {
    run_command(persistence, booking_id, Command::Cancel)
}

/// Marks a booking paid.
///
/// # Errors
///
/// Returns an error if the booking does not exist or the method is blank.
pub fn record_payment(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &RecordPaymentRequest,
) -> Result<BookingTransitionResponse, ApiError> {
    run_command(
        persistence,
        booking_id,
        Command::RecordPayment {
            method: request.payment_method.clone(),
        },
    )
}
