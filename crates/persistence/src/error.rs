// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested guest was not found.
    GuestNotFound(i64),
    /// The requested room was not found.
    RoomNotFound(i64),
    /// The requested booking was not found.
    BookingNotFound(i64),
    /// Another guest already uses this email address.
    DuplicateEmail(String),
    /// A room with this number already exists.
    DuplicateRoomNumber(i64),
    /// A unique constraint was violated.
    UniqueViolation(String),
    /// A referenced row does not exist, or a referenced row cannot be removed.
    ForeignKeyViolation(String),
    /// Guest cannot be deleted because bookings reference it.
    GuestHasBookings { guest_id: i64, booking_count: i64 },
    /// Room cannot be deleted because bookings reference it.
    RoomHasBookings { room_number: i64, booking_count: i64 },
    /// A room-blocking booking already overlaps the requested stay.
    OverlappingBooking {
        room_number: i64,
        conflicting_booking_id: i64,
    },
    /// A stored value could not be converted back into a domain value.
    InvalidStoredValue(String),
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::GuestNotFound(id) => write!(f, "Guest not found: {id}"),
            Self::RoomNotFound(number) => write!(f, "Room not found: {number}"),
            Self::BookingNotFound(id) => write!(f, "Booking not found: {id}"),
            Self::DuplicateEmail(email) => {
                write!(f, "A guest with email '{email}' already exists")
            }
            Self::DuplicateRoomNumber(number) => write!(f, "Room {number} already exists"),
            Self::UniqueViolation(msg) => write!(f, "Unique constraint violated: {msg}"),
            Self::ForeignKeyViolation(msg) => write!(f, "Foreign key constraint violated: {msg}"),
            Self::GuestHasBookings {
                guest_id,
                booking_count,
            } => write!(
                f,
                "Guest {guest_id} cannot be deleted: referenced by {booking_count} booking(s)"
            ),
            Self::RoomHasBookings {
                room_number,
                booking_count,
            } => write!(
                f,
                "Room {room_number} cannot be deleted: referenced by {booking_count} booking(s)"
            ),
            Self::OverlappingBooking {
                room_number,
                conflicting_booking_id,
            } => write!(
                f,
                "Room {room_number} is already held by booking {conflicting_booking_id} \
                 for an overlapping stay"
            ),
            Self::InvalidStoredValue(msg) => write!(f, "Invalid stored value: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKeyViolation(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<hotel_desk_domain::DomainError> for PersistenceError {
    fn from(err: hotel_desk_domain::DomainError) -> Self {
        Self::InvalidStoredValue(err.to_string())
    }
}
