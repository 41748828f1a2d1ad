// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use hotel_desk::CoreError;
use hotel_desk_domain::DomainError;
use hotel_desk_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core/persistence errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request collides with stored state (duplicate key, referenced row, double booking).
    Conflict {
        /// The type of resource involved.
        resource_type: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The uploaded CSV could not be read.
    InvalidCsvFormat {
        /// Why the file was rejected.
        reason: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} conflict: {message}")
            }
            Self::InvalidCsvFormat { reason } => write!(f, "Invalid CSV: {reason}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Builds an `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Builds a `ResourceNotFound` error.
    #[must_use]
    pub fn not_found(resource_type: &str, message: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message: message.into(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidStayRange { .. } => ApiError::invalid_input("check_out_date", message),
        DomainError::InvalidMoney(_) => ApiError::invalid_input("price", message),
        DomainError::InvalidRoomType(_) => ApiError::invalid_input("room_type", message),
        DomainError::InvalidRoomStatus(_) => ApiError::invalid_input("status", message),
        DomainError::InvalidBookingStatus(_) => ApiError::invalid_input("status", message),
        DomainError::DateParseError { .. } => ApiError::invalid_input("date", message),
        DomainError::InvalidGuestField { field, .. }
        | DomainError::InvalidRoomField { field, .. } => {
            ApiError::invalid_input(field, message)
        }
        DomainError::EmptyPaymentMethod => ApiError::invalid_input("payment_method", message),
        DomainError::EmptyParty => ApiError::invalid_input("number_of_guests", message),
        DomainError::PriceOverflow { .. } => ApiError::DomainRuleViolation {
            rule: String::from("price_in_range"),
            message,
        },
        DomainError::PartyTooLarge { .. } => ApiError::DomainRuleViolation {
            rule: String::from("room_capacity"),
            message,
        },
        DomainError::RoomUnavailable { .. } => ApiError::Conflict {
            resource_type: String::from("Room"),
            message,
        },
        DomainError::InvalidStatusTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("booking_lifecycle"),
            message,
        },
        DomainError::CheckInTooEarly { .. } => ApiError::DomainRuleViolation {
            rule: String::from("check_in_date_reached"),
            message,
        },
        DomainError::BookingClosed { .. } => ApiError::DomainRuleViolation {
            rule: String::from("booking_open"),
            message,
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Missing rows become `ResourceNotFound`, key collisions and referenced rows
/// become `Conflict`, and everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    let message: String = err.to_string();
    match err {
        PersistenceError::GuestNotFound(_) => ApiError::not_found("Guest", message),
        PersistenceError::RoomNotFound(_) => ApiError::not_found("Room", message),
        PersistenceError::BookingNotFound(_) => ApiError::not_found("Booking", message),
        PersistenceError::NotFound(_) => ApiError::not_found("Record", message),
        PersistenceError::DuplicateEmail(_) | PersistenceError::GuestHasBookings { .. } => {
            ApiError::Conflict {
                resource_type: String::from("Guest"),
                message,
            }
        }
        PersistenceError::DuplicateRoomNumber(_)
        | PersistenceError::RoomHasBookings { .. }
        | PersistenceError::OverlappingBooking { .. } => ApiError::Conflict {
            resource_type: String::from("Room"),
            message,
        },
        PersistenceError::UniqueViolation(_) | PersistenceError::ForeignKeyViolation(_) => {
            ApiError::Conflict {
                resource_type: String::from("Record"),
                message,
            }
        }
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled
        | PersistenceError::InvalidStoredValue(_) => ApiError::Internal { message },
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}
