// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry dates as `YYYY-MM-DD` strings and money as decimal
//! strings; the handlers parse them into domain values.

use hotel_desk_domain::{Booking, Guest, Room};
use hotel_desk_persistence::BookingDetails;
use serde::{Deserialize, Serialize};

// ============================================================================
// Guests
// ============================================================================

/// API request to create or replace a guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub loyalty_points: u32,
    #[serde(default)]
    pub nationality: String,
}

/// A stored guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestInfo {
    pub guest_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub loyalty_points: u32,
    pub nationality: String,
}

impl GuestInfo {
    /// Builds the response view of a persisted guest.
    ///
    /// Unpersisted guests report ID 0.
    #[must_use]
    pub fn from_guest(guest: &Guest) -> Self {
        Self {
            guest_id: guest.guest_id.unwrap_or_default(),
            first_name: guest.first_name.clone(),
            last_name: guest.last_name.clone(),
            full_name: guest.full_name(),
            email: guest.email.clone(),
            phone: guest.phone.clone(),
            loyalty_points: guest.loyalty_points,
            nationality: guest.nationality.clone(),
        }
    }
}

/// API response listing guests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListGuestsResponse {
    pub guests: Vec<GuestInfo>,
}

/// A guest with their bookings and stay totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestHistoryResponse {
    pub guest: GuestInfo,
    /// Most recent stay first.
    pub bookings: Vec<BookingInfo>,
    /// Nights across all bookings that were not cancelled.
    pub total_nights: u32,
    /// Sum of the totals of bookings that were not cancelled.
    pub total_spent: String,
    pub is_vip: bool,
}

// ============================================================================
// Rooms
// ============================================================================

/// API request to create a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub room_number: i64,
    /// Single, Double, Deluxe or Suite (case-insensitive).
    pub room_type: String,
    /// Decimal nightly rate, e.g. `"120.50"`.
    pub price_per_night: String,
    pub max_occupancy: u32,
    #[serde(default)]
    pub has_balcony: bool,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Housekeeping status; `Clean` when omitted.
    #[serde(default)]
    pub status: Option<String>,
}

/// API request to replace a room's attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRoomRequest {
    pub room_type: String,
    pub price_per_night: String,
    pub max_occupancy: u32,
    pub has_balcony: bool,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub is_available: bool,
    pub status: String,
}

/// API request to flip a room's availability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAvailabilityRequest {
    pub is_available: bool,
}

/// Filters for listing rooms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRoomsRequest {
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Order by nightly price instead of room number.
    #[serde(default)]
    pub sort_by_price: bool,
}

/// API request for rooms free across a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableRoomsRequest {
    pub check_in_date: String,
    pub check_out_date: String,
    /// Only rooms that can hold this many guests.
    #[serde(default)]
    pub number_of_guests: Option<u32>,
}

/// API request for rooms within a nightly price band (inclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeRequest {
    pub min_price: String,
    pub max_price: String,
}

/// A stored room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    pub room_number: i64,
    pub room_type: String,
    pub price_per_night: String,
    pub max_occupancy: u32,
    pub has_balcony: bool,
    pub amenities: Vec<String>,
    pub is_available: bool,
    pub status: String,
}

impl RoomInfo {
    #[must_use]
    pub fn from_room(room: &Room) -> Self {
        Self {
            room_number: room.room_number,
            room_type: room.room_type.label().to_string(),
            price_per_night: room.price_per_night.to_string(),
            max_occupancy: room.max_occupancy,
            has_balcony: room.has_balcony,
            amenities: room.amenities.clone(),
            is_available: room.is_available,
            status: room.status.label().to_string(),
        }
    }
}

/// API response listing rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRoomsResponse {
    pub rooms: Vec<RoomInfo>,
}

// ============================================================================
// Bookings
// ============================================================================

/// API request to create a booking or change an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequestBody {
    pub guest_id: i64,
    pub room_number: i64,
    pub check_in_date: String,
    pub check_out_date: String,
    pub number_of_guests: u32,
}

/// Filters for listing bookings.
///
/// `start_date` and `end_date` must be given together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBookingsRequest {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// API request for bookings whose check-in falls in a window (inclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalsRequest {
    pub start_date: String,
    pub end_date: String,
}

/// API request to record a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub payment_method: String,
}

/// A stored booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInfo {
    pub booking_id: i64,
    pub guest_id: i64,
    pub room_number: i64,
    pub check_in_date: String,
    pub check_out_date: String,
    pub nights: u32,
    pub number_of_guests: u32,
    pub total_price: String,
    pub status: String,
    pub is_paid: bool,
    pub payment_method: Option<String>,
}

impl BookingInfo {
    #[must_use]
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            booking_id: booking.booking_id.unwrap_or_default(),
            guest_id: booking.guest_id,
            room_number: booking.room_number,
            check_in_date: booking.stay.check_in().to_string(),
            check_out_date: booking.stay.check_out().to_string(),
            nights: booking.nights(),
            number_of_guests: booking.number_of_guests,
            total_price: booking.total_price.to_string(),
            status: booking.status.label().to_string(),
            is_paid: booking.is_paid,
            payment_method: booking.payment_method.clone(),
        }
    }
}

/// A booking joined with its guest and room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDetailsResponse {
    pub booking: BookingInfo,
    pub guest: GuestInfo,
    pub room: RoomInfo,
}

impl BookingDetailsResponse {
    #[must_use]
    pub fn from_details(details: &BookingDetails) -> Self {
        Self {
            booking: BookingInfo::from_booking(&details.booking),
            guest: GuestInfo::from_guest(&details.guest),
            room: RoomInfo::from_room(&details.room),
        }
    }
}

/// API response listing bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBookingsResponse {
    pub bookings: Vec<BookingInfo>,
}

/// API response for a lifecycle command (check in, check out, cancel, payment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingTransitionResponse {
    pub booking: BookingInfo,
    pub previous_status: String,
    /// The room's availability after the command, when it changed.
    pub room_available: Option<bool>,
    pub message: String,
}
