// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to and from domain values.
//!
//! Storage conventions: dates are `YYYY-MM-DD` text, money is integer
//! cents, booleans are `0`/`1` integers, amenities are one comma-separated
//! string, and enums use their `as_str()` form.

use diesel::prelude::*;
use hotel_desk_domain::{
    Booking, BookingStatus, Guest, Money, Room, RoomStatus, RoomType, StayRange,
};

use crate::diesel_schema::{bookings, guests, rooms};
use crate::error::PersistenceError;

/// A booking together with its guest and room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetails {
    pub booking: Booking,
    pub guest: Guest,
    pub room: Room,
}

pub(crate) const fn flag(value: bool) -> i32 {
    if value { 1 } else { 0 }
}

/// Converts a count to the `INTEGER` column width.
pub(crate) fn small_int(value: u32, field: &str) -> Result<i32, PersistenceError> {
    i32::try_from(value)
        .map_err(|_| PersistenceError::InvalidStoredValue(format!("{field} {value} is too large")))
}

fn unsigned(value: i64, field: &str) -> Result<u32, PersistenceError> {
    u32::try_from(value)
        .map_err(|_| PersistenceError::InvalidStoredValue(format!("{field} {value} out of range")))
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = guests)]
pub(crate) struct GuestRow {
    pub guest_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub loyalty_points: i64,
    pub nationality: String,
}

impl GuestRow {
    pub fn into_domain(self) -> Result<Guest, PersistenceError> {
        Ok(Guest {
            guest_id: Some(self.guest_id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            loyalty_points: unsigned(self.loyalty_points, "loyalty_points")?,
            nationality: self.nationality,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = guests)]
pub(crate) struct NewGuestRow<'a> {
    pub guest_id: Option<i64>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub loyalty_points: i64,
    pub nationality: &'a str,
}

impl<'a> From<&'a Guest> for NewGuestRow<'a> {
    fn from(guest: &'a Guest) -> Self {
        Self {
            guest_id: guest.guest_id,
            first_name: &guest.first_name,
            last_name: &guest.last_name,
            email: &guest.email,
            phone: &guest.phone,
            loyalty_points: i64::from(guest.loyalty_points),
            nationality: &guest.nationality,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = rooms)]
pub(crate) struct RoomRow {
    pub room_number: i64,
    pub room_type: String,
    pub price_cents: i64,
    pub max_occupancy: i32,
    pub has_balcony: i32,
    pub amenities: String,
    pub is_available: i32,
    pub status: String,
}

impl RoomRow {
    pub fn into_domain(self) -> Result<Room, PersistenceError> {
        Ok(Room {
            room_number: self.room_number,
            room_type: self.room_type.parse::<RoomType>()?,
            price_per_night: Money::from_cents(self.price_cents),
            max_occupancy: unsigned(i64::from(self.max_occupancy), "max_occupancy")?,
            has_balcony: self.has_balcony != 0,
            amenities: Room::parse_amenities(&self.amenities),
            is_available: self.is_available != 0,
            status: self.status.parse::<RoomStatus>()?,
        })
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = rooms)]
#[diesel(primary_key(room_number))]
pub(crate) struct RoomRecord<'a> {
    pub room_number: i64,
    pub room_type: &'a str,
    pub price_cents: i64,
    pub max_occupancy: i32,
    pub has_balcony: i32,
    pub amenities: String,
    pub is_available: i32,
    pub status: &'a str,
}

impl<'a> RoomRecord<'a> {
    pub fn from_domain(room: &'a Room) -> Result<Self, PersistenceError> {
        Ok(Self {
            room_number: room.room_number,
            room_type: room.room_type.as_str(),
            price_cents: room.price_per_night.cents(),
            max_occupancy: small_int(room.max_occupancy, "max_occupancy")?,
            has_balcony: flag(room.has_balcony),
            amenities: room.amenities_string(),
            is_available: flag(room.is_available),
            status: room.status.as_str(),
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = bookings)]
pub(crate) struct BookingRow {
    pub booking_id: i64,
    pub guest_id: i64,
    pub room_number: i64,
    pub check_in_date: String,
    pub check_out_date: String,
    pub number_of_guests: i32,
    pub total_price_cents: i64,
    pub status: String,
    pub is_paid: i32,
    pub payment_method: Option<String>,
}

impl BookingRow {
    pub fn into_domain(self) -> Result<Booking, PersistenceError> {
        Ok(Booking {
            booking_id: Some(self.booking_id),
            guest_id: self.guest_id,
            room_number: self.room_number,
            stay: StayRange::parse(&self.check_in_date, &self.check_out_date)?,
            number_of_guests: unsigned(i64::from(self.number_of_guests), "number_of_guests")?,
            total_price: Money::from_cents(self.total_price_cents),
            status: self.status.parse::<BookingStatus>()?,
            is_paid: self.is_paid != 0,
            payment_method: self.payment_method,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub booking_id: Option<i64>,
    pub guest_id: i64,
    pub room_number: i64,
    pub check_in_date: String,
    pub check_out_date: String,
    pub number_of_guests: i32,
    pub total_price_cents: i64,
    pub status: &'a str,
    pub is_paid: i32,
    pub payment_method: Option<&'a str>,
}

impl<'a> NewBookingRow<'a> {
    pub fn from_domain(booking: &'a Booking) -> Result<Self, PersistenceError> {
        Ok(Self {
            booking_id: booking.booking_id,
            guest_id: booking.guest_id,
            room_number: booking.room_number,
            check_in_date: booking.stay.check_in().to_string(),
            check_out_date: booking.stay.check_out().to_string(),
            number_of_guests: small_int(booking.number_of_guests, "number_of_guests")?,
            total_price_cents: booking.total_price.cents(),
            status: booking.status.as_str(),
            is_paid: flag(booking.is_paid),
            payment_method: booking.payment_method.as_deref(),
        })
    }
}

/// Loads every row of a query result into domain values.
pub(crate) fn convert_all<R, T>(
    rows: Vec<R>,
    convert: fn(R) -> Result<T, PersistenceError>,
) -> Result<Vec<T>, PersistenceError> {
    rows.into_iter().map(convert).collect()
}
