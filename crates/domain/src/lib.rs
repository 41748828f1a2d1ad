// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod availability;
mod booking;
mod error;
mod money;
mod search;
mod stay;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use availability::{ensure_room_free, find_conflict};
pub use booking::{Booking, BookingStatus};
pub use search::{
    bookings_checking_in_between, filter_bookings_by_status, filter_rooms_by_status,
    filter_rooms_by_type, find_guest_by_id, rooms_in_price_range, sort_rooms_by_price,
};

// Re-export public types
pub use error::DomainError;
pub use money::Money;
pub use stay::{StayRange, parse_date};
pub use types::{
    Guest, Room, RoomStatus, RoomType, VIP_BOOKING_THRESHOLD, VIP_LOYALTY_THRESHOLD,
};
pub use validation::{validate_guest_fields, validate_party_size, validate_room_fields};
