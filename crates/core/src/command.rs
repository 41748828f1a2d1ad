// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hotel_desk_domain::StayRange;
use time::Date;

/// A command represents front-desk intent for an existing booking as data only.
///
/// Commands are the only way to request booking status or payment changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The guest has arrived.
    CheckIn {
        /// The date the guest is checking in.
        today: Date,
    },
    /// The guest is leaving.
    CheckOut,
    /// Withdraw the reservation before arrival.
    Cancel,
    /// Mark the booking paid.
    RecordPayment {
        /// How the guest paid (card, cash, ...).
        method: String,
    },
}

impl Command {
    /// Returns the command name used in log output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CheckIn { .. } => "CheckIn",
            Self::CheckOut => "CheckOut",
            Self::Cancel => "Cancel",
            Self::RecordPayment { .. } => "RecordPayment",
        }
    }
}

/// A request to reserve a room, or to change an existing reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// The guest making the booking.
    pub guest_id: i64,
    /// The room requested.
    pub room_number: i64,
    /// The requested stay.
    pub stay: StayRange,
    /// Party size.
    pub number_of_guests: u32,
}
