// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking::{Booking, BookingStatus};
use crate::error::DomainError;
use crate::money::Money;
use crate::stay::StayRange;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Loyalty balance above which a guest is treated as a VIP.
pub const VIP_LOYALTY_THRESHOLD: u32 = 1000;

/// Number of bookings above which a guest is treated as a VIP.
pub const VIP_BOOKING_THRESHOLD: usize = 5;

/// Normalizes an enum string for lenient matching.
///
/// `"Checked-in"`, `"CHECKED_IN"` and `"checked in"` all become `"checked_in"`.
pub(crate) fn normalize_token(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(['-', ' '], "_")
}

/// The category of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Single,
    Double,
    Deluxe,
    Suite,
}

impl RoomType {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Deluxe => "deluxe",
            Self::Suite => "suite",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Deluxe => "Deluxe",
            Self::Suite => "Suite",
        }
    }
}

impl FromStr for RoomType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "deluxe" => Ok(Self::Deluxe),
            "suite" => Ok(Self::Suite),
            _ => Err(DomainError::InvalidRoomType(s.to_string())),
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Housekeeping state of a room.
///
/// This is informational and does not gate bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    #[default]
    Clean,
    Dirty,
    Maintenance,
    Occupied,
}

impl RoomStatus {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Dirty => "dirty",
            Self::Maintenance => "maintenance",
            Self::Occupied => "occupied",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Clean => "Clean",
            Self::Dirty => "Dirty",
            Self::Maintenance => "Maintenance",
            Self::Occupied => "Occupied",
        }
    }
}

impl FromStr for RoomStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "clean" => Ok(Self::Clean),
            "dirty" => Ok(Self::Dirty),
            "maintenance" => Ok(Self::Maintenance),
            "occupied" => Ok(Self::Occupied),
            _ => Err(DomainError::InvalidRoomStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A hotel guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    /// The identifier assigned by the database.
    /// `None` indicates the guest has not been persisted yet.
    pub guest_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub loyalty_points: u32,
    pub nationality: String,
}

impl Guest {
    /// Creates a new `Guest` without a persisted ID.
    ///
    /// Names and email are trimmed; email is lowercased so lookups are
    /// case-insensitive.
    #[must_use]
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
        loyalty_points: u32,
        nationality: &str,
    ) -> Self {
        Self {
            guest_id: None,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: phone.trim().to_string(),
            loyalty_points,
            nationality: nationality.trim().to_string(),
        }
    }

    /// Returns a copy of this guest carrying a persisted ID.
    #[must_use]
    pub fn with_id(mut self, guest_id: i64) -> Self {
        self.guest_id = Some(guest_id);
        self
    }

    /// Returns `"First Last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Adds loyalty points, saturating at `u32::MAX`, and returns the new balance.
    pub fn add_loyalty_points(&mut self, points: u32) -> u32 {
        self.loyalty_points = self.loyalty_points.saturating_add(points);
        self.loyalty_points
    }

    /// Returns true if the guest qualifies as a VIP.
    ///
    /// A guest is a VIP with more than 1000 loyalty points or more than five
    /// bookings on record.
    #[must_use]
    pub const fn is_vip(&self, booking_count: usize) -> bool {
        self.loyalty_points > VIP_LOYALTY_THRESHOLD || booking_count > VIP_BOOKING_THRESHOLD
    }

    /// Sums the nights of this guest's stays, skipping cancelled bookings.
    #[must_use]
    pub fn total_nights(&self, bookings: &[Booking]) -> u32 {
        bookings
            .iter()
            .filter(|b| Some(b.guest_id) == self.guest_id)
            .filter(|b| b.status != BookingStatus::Cancelled)
            .fold(0_u32, |acc, b| acc.saturating_add(b.nights()))
    }
}

/// A bookable room. The room number is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub room_number: i64,
    pub room_type: RoomType,
    pub price_per_night: Money,
    pub max_occupancy: u32,
    pub has_balcony: bool,
    pub amenities: Vec<String>,
    /// Cleared while a guest is checked in.
    pub is_available: bool,
    pub status: RoomStatus,
}

impl Room {
    /// Creates an available, clean room with no amenities.
    #[must_use]
    pub const fn new(
        room_number: i64,
        room_type: RoomType,
        price_per_night: Money,
        max_occupancy: u32,
        has_balcony: bool,
    ) -> Self {
        Self {
            room_number,
            room_type,
            price_per_night,
            max_occupancy,
            has_balcony,
            amenities: Vec::new(),
            is_available: true,
            status: RoomStatus::Clean,
        }
    }

    /// Returns true if the room can hold `guests` people.
    #[must_use]
    pub const fn can_accommodate(&self, guests: u32) -> bool {
        guests <= self.max_occupancy
    }

    /// Computes the price of a stay at this room's nightly rate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PriceOverflow` if the total does not fit.
    pub fn price_for_stay(&self, stay: &StayRange) -> Result<Money, DomainError> {
        self.price_per_night.times(stay.nights())
    }

    /// Appends an amenity, ignoring blanks and duplicates.
    pub fn add_amenity(&mut self, item: &str) {
        let trimmed: &str = item.trim();
        if !trimmed.is_empty() && !self.amenities.iter().any(|a| a == trimmed) {
            self.amenities.push(trimmed.to_string());
        }
    }

    /// Splits a comma-separated amenity list.
    #[must_use]
    pub fn parse_amenities(value: &str) -> Vec<String> {
        let mut room_amenities: Vec<String> = Vec::new();
        for item in value.split(',') {
            let trimmed: &str = item.trim();
            if !trimmed.is_empty() && !room_amenities.iter().any(|a| a == trimmed) {
                room_amenities.push(trimmed.to_string());
            }
        }
        room_amenities
    }

    /// Joins the amenities into their comma-separated storage form.
    #[must_use]
    pub fn amenities_string(&self) -> String {
        self.amenities.join(",")
    }
}
