// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Check-out is not strictly after check-in.
    InvalidStayRange {
        /// The requested check-in date.
        check_in: Date,
        /// The requested check-out date.
        check_out: Date,
    },
    /// A monetary amount could not be parsed or is negative.
    InvalidMoney(String),
    /// Price arithmetic overflowed.
    PriceOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Room type string is not recognized.
    InvalidRoomType(String),
    /// Room status string is not recognized.
    InvalidRoomStatus(String),
    /// Booking status string is not recognized.
    InvalidBookingStatus(String),
    /// Failed to parse a date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A guest field is empty or malformed.
    InvalidGuestField {
        /// The offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
    /// A room field is out of range.
    InvalidRoomField {
        /// The offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
    /// A booking must be for at least one guest.
    EmptyParty,
    /// The party does not fit in the room.
    PartyTooLarge {
        /// The room number.
        room_number: i64,
        /// Requested number of guests.
        guests: u32,
        /// Room capacity.
        max_occupancy: u32,
    },
    /// Another booking already holds the room for an overlapping stay.
    RoomUnavailable {
        /// The room number.
        room_number: i64,
        /// Requested check-in date.
        check_in: Date,
        /// Requested check-out date.
        check_out: Date,
        /// The booking that holds the room, if it has been persisted.
        conflicting_booking_id: Option<i64>,
    },
    /// The requested status change is not permitted.
    InvalidStatusTransition {
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// Check-in was attempted before the booked check-in date.
    CheckInTooEarly {
        /// The booked check-in date.
        check_in: Date,
        /// The date the check-in was attempted.
        today: Date,
    },
    /// Stay details cannot change once a booking is closed.
    BookingClosed {
        /// The booking identifier.
        booking_id: Option<i64>,
        /// The closed status.
        status: String,
    },
    /// A payment must name its method.
    EmptyPaymentMethod,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStayRange {
                check_in,
                check_out,
            } => {
                write!(
                    f,
                    "Check-out date {check_out} must be after check-in date {check_in}"
                )
            }
            Self::InvalidMoney(msg) => write!(f, "Invalid amount: {msg}"),
            Self::PriceOverflow { operation } => {
                write!(f, "Price arithmetic overflow while {operation}")
            }
            Self::InvalidRoomType(value) => write!(
                f,
                "Invalid room type '{value}'. Must be Single, Double, Deluxe, or Suite"
            ),
            Self::InvalidRoomStatus(value) => write!(
                f,
                "Invalid room status '{value}'. Must be Clean, Dirty, Maintenance, or Occupied"
            ),
            Self::InvalidBookingStatus(value) => write!(
                f,
                "Invalid booking status '{value}'. \
                 Must be Confirmed, Checked-in, Checked-out, or Cancelled"
            ),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidGuestField { field, reason } => {
                write!(f, "Invalid guest {field}: {reason}")
            }
            Self::InvalidRoomField { field, reason } => {
                write!(f, "Invalid room {field}: {reason}")
            }
            Self::EmptyParty => write!(f, "A booking must be for at least one guest"),
            Self::PartyTooLarge {
                room_number,
                guests,
                max_occupancy,
            } => {
                write!(
                    f,
                    "Room {room_number} holds at most {max_occupancy} guests, {guests} requested"
                )
            }
            Self::RoomUnavailable {
                room_number,
                check_in,
                check_out,
                conflicting_booking_id,
            } => {
                write!(
                    f,
                    "Room {room_number} is not available from {check_in} to {check_out}"
                )?;
                if let Some(id) = conflicting_booking_id {
                    write!(f, " (held by booking {id})")?;
                }
                Ok(())
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot change booking status from {from} to {to}: {reason}")
            }
            Self::CheckInTooEarly { check_in, today } => {
                write!(
                    f,
                    "Cannot check in before the check-in date {check_in} (today is {today})"
                )
            }
            Self::BookingClosed { booking_id, status } => match booking_id {
                Some(id) => write!(f, "Booking {id} is {status} and can no longer be changed"),
                None => write!(f, "Booking is {status} and can no longer be changed"),
            },
            Self::EmptyPaymentMethod => write!(f, "Payment method cannot be empty"),
        }
    }
}

impl std::error::Error for DomainError {}
