// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bookings and the booking status lifecycle.
//!
//! ```text
//! Confirmed ──check in (on/after arrival)──▶ CheckedIn ──check out──▶ CheckedOut
//!     │
//!     └──cancel──▶ Cancelled
//! ```
//!
//! Checked-out and cancelled bookings are closed: no further transitions and
//! no stay changes.

use crate::error::DomainError;
use crate::money::Money;
use crate::stay::StayRange;
use crate::types::normalize_token;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Booking status states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Reserved, guest has not arrived yet.
    #[default]
    Confirmed,
    /// Guest is in the room.
    CheckedIn,
    /// Guest has left.
    CheckedOut,
    /// Reservation withdrawn before arrival.
    Cancelled,
}

impl BookingStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::CheckedIn => "checked_in",
            Self::CheckedOut => "checked_out",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::CheckedIn => "Checked-in",
            Self::CheckedOut => "Checked-out",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns true if a booking in this status holds its room.
    ///
    /// Only cancelled bookings release the room for other guests.
    #[must_use]
    pub const fn blocks_room(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled)
    }

    /// Validates a status change.
    ///
    /// `check_in` and `today` are only consulted for `Confirmed → CheckedIn`,
    /// which is not allowed before the booked arrival date.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CheckInTooEarly` for an early check-in, and
    /// `DomainError::InvalidStatusTransition` for any other rejected change.
    pub fn validate_transition(
        &self,
        new_status: Self,
        check_in: Date,
        today: Date,
    ) -> Result<(), DomainError> {
        let reject = |reason: &str| DomainError::InvalidStatusTransition {
            from: self.label().to_string(),
            to: new_status.label().to_string(),
            reason: reason.to_string(),
        };

        if self.is_terminal() {
            return Err(reject("booking is already closed"));
        }

        match (self, new_status) {
            (Self::Confirmed, Self::CheckedIn) => {
                if today < check_in {
                    return Err(DomainError::CheckInTooEarly { check_in, today });
                }
                Ok(())
            }
            (Self::CheckedIn, Self::CheckedOut) | (Self::Confirmed, Self::Cancelled) => Ok(()),
            (Self::CheckedIn, Self::Cancelled) => {
                Err(reject("guest has already checked in"))
            }
            (Self::Confirmed, Self::CheckedOut) => {
                Err(reject("only checked-in bookings can be checked out"))
            }
            (Self::CheckedIn, Self::CheckedIn) => Err(reject("guest is already checked in")),
            _ => Err(reject("transition not permitted by booking lifecycle rules")),
        }
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "confirmed" => Ok(Self::Confirmed),
            "checked_in" | "checkedin" => Ok(Self::CheckedIn),
            "checked_out" | "checkedout" => Ok(Self::CheckedOut),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidBookingStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A room reservation for one guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// The identifier assigned by the database.
    /// `None` indicates the booking has not been persisted yet.
    pub booking_id: Option<i64>,
    pub guest_id: i64,
    pub room_number: i64,
    pub stay: StayRange,
    pub number_of_guests: u32,
    /// Always `price_per_night × nights` at the rate in force when the stay
    /// was last set.
    pub total_price: Money,
    pub status: BookingStatus,
    pub is_paid: bool,
    pub payment_method: Option<String>,
}

impl Booking {
    /// Returns the number of nights booked.
    #[must_use]
    pub fn nights(&self) -> u32 {
        self.stay.nights()
    }

    /// Returns true if the guest is currently in the room.
    #[must_use]
    pub fn is_active(&self, today: Date) -> bool {
        self.status == BookingStatus::CheckedIn && self.stay.contains(today)
    }

    /// Returns true if the booking is confirmed and the arrival date is ahead.
    #[must_use]
    pub fn is_upcoming(&self, today: Date) -> bool {
        self.status == BookingStatus::Confirmed && today < self.stay.check_in()
    }

    /// Returns true if the guest has checked out and the stay is over.
    #[must_use]
    pub fn is_completed(&self, today: Date) -> bool {
        self.status == BookingStatus::CheckedOut && today >= self.stay.check_out()
    }

    /// Returns true if the guest may check in on `today`.
    #[must_use]
    pub fn can_check_in(&self, today: Date) -> bool {
        self.status == BookingStatus::Confirmed && today >= self.stay.check_in()
    }

    /// Returns true if both bookings hold the same room for a shared night.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        let same_booking: bool = match (self.booking_id, other.booking_id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };
        !same_booking
            && self.room_number == other.room_number
            && self.status.blocks_room()
            && other.status.blocks_room()
            && self.stay.overlaps(&other.stay)
    }
}
