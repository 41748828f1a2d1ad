// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hotel_desk_domain::{Booking, BookingStatus};

/// The change a transition implies for the booked room's availability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomEffect {
    /// The guest now occupies the room.
    MarkUnavailable,
    /// The room is free again.
    MarkAvailable,
}

impl RoomEffect {
    /// Returns the availability flag the room should carry afterwards.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::MarkAvailable)
    }
}

/// The result of applying a command to a booking.
///
/// The input booking is never modified. Callers persist `booking` and, when
/// present, apply `room_effect` to the room in the same transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The booking after the command.
    pub booking: Booking,
    /// The status before the command.
    pub previous_status: BookingStatus,
    /// Availability change for the booked room, if any.
    pub room_effect: Option<RoomEffect>,
}
