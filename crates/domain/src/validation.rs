// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::money::Money;
use crate::types::{Guest, Room};

/// Validates that a guest's basic field constraints are met.
///
/// This function checks that required fields are present and well formed.
/// It does NOT check email uniqueness (that requires the stored guests).
///
/// # Arguments
///
/// * `guest` - The guest to validate
///
/// # Errors
///
/// Returns an error if:
/// - The first or last name is empty
/// - The email does not have exactly one `@` with text on both sides
pub fn validate_guest_fields(guest: &Guest) -> Result<(), DomainError> {
    if guest.first_name.trim().is_empty() {
        return Err(DomainError::InvalidGuestField {
            field: "first_name",
            reason: String::from("cannot be empty"),
        });
    }

    if guest.last_name.trim().is_empty() {
        return Err(DomainError::InvalidGuestField {
            field: "last_name",
            reason: String::from("cannot be empty"),
        });
    }

    let email: &str = guest.email.trim();
    let valid_email: bool = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid_email {
        return Err(DomainError::InvalidGuestField {
            field: "email",
            reason: format!("'{email}' is not a valid email address"),
        });
    }

    Ok(())
}

/// Validates that a room's numeric fields are in range.
///
/// # Errors
///
/// Returns an error if:
/// - The room number is not positive
/// - The maximum occupancy is zero
/// - The nightly price is negative
pub fn validate_room_fields(room: &Room) -> Result<(), DomainError> {
    if room.room_number <= 0 {
        return Err(DomainError::InvalidRoomField {
            field: "room_number",
            reason: format!("must be positive, got {}", room.room_number),
        });
    }

    if room.max_occupancy == 0 {
        return Err(DomainError::InvalidRoomField {
            field: "max_occupancy",
            reason: String::from("must be at least 1"),
        });
    }

    if room.price_per_night < Money::ZERO {
        return Err(DomainError::InvalidRoomField {
            field: "price_per_night",
            reason: format!("cannot be negative, got {}", room.price_per_night),
        });
    }

    Ok(())
}

/// Validates that a party fits the room.
///
/// # Errors
///
/// Returns `DomainError::EmptyParty` for zero guests and
/// `DomainError::PartyTooLarge` if the room cannot hold them.
pub const fn validate_party_size(room: &Room, guests: u32) -> Result<(), DomainError> {
    if guests == 0 {
        return Err(DomainError::EmptyParty);
    }
    if !room.can_accommodate(guests) {
        return Err(DomainError::PartyTooLarge {
            room_number: room.room_number,
            guests,
            max_occupancy: room.max_occupancy,
        });
    }
    Ok(())
}
