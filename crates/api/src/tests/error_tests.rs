// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hotel_desk::CoreError;
use hotel_desk_domain::DomainError;
use hotel_desk_persistence::PersistenceError;
use time::macros::date;

use crate::{ApiError, translate_core_error, translate_domain_error, translate_persistence_error};

#[test]
fn test_domain_input_errors_name_the_field() {
    let err: ApiError = translate_domain_error(DomainError::InvalidGuestField {
        field: "email",
        reason: String::from("missing @"),
    });
    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("email"),
            message: String::from("Invalid guest email: missing @"),
        }
    );

    assert!(matches!(
        translate_domain_error(DomainError::InvalidRoomType(String::from("Loft"))),
        ApiError::InvalidInput { field, .. } if field == "room_type"
    ));
}

#[test]
fn test_domain_rule_errors() {
    let err: ApiError = translate_domain_error(DomainError::CheckInTooEarly {
        check_in: date!(2026 - 05 - 02),
        today: date!(2026 - 05 - 01),
    });
    assert!(
        matches!(err, ApiError::DomainRuleViolation { rule, .. } if rule == "check_in_date_reached")
    );

    let unavailable: ApiError = translate_domain_error(DomainError::RoomUnavailable {
        room_number: 12,
        check_in: date!(2026 - 05 - 01),
        check_out: date!(2026 - 05 - 03),
        conflicting_booking_id: Some(4),
    });
    assert_eq!(
        unavailable.to_string(),
        "Room conflict: Room 12 is not available from 2026-05-01 to 2026-05-03 (held by booking 4)"
    );
}

#[test]
fn test_core_errors_unwrap_domain_violations() {
    assert!(matches!(
        translate_core_error(CoreError::DomainViolation(DomainError::EmptyPaymentMethod)),
        ApiError::InvalidInput { field, .. } if field == "payment_method"
    ));
    assert!(matches!(
        translate_core_error(CoreError::Internal(String::from("boom"))),
        ApiError::Internal { .. }
    ));
}

#[test]
fn test_persistence_errors() {
    assert!(matches!(
        translate_persistence_error(PersistenceError::BookingNotFound(3)),
        ApiError::ResourceNotFound { resource_type, .. } if resource_type == "Booking"
    ));
    assert!(matches!(
        translate_persistence_error(PersistenceError::OverlappingBooking {
            room_number: 5,
            conflicting_booking_id: 9,
        }),
        ApiError::Conflict { .. }
    ));
    assert!(matches!(
        translate_persistence_error(PersistenceError::GuestHasBookings {
            guest_id: 1,
            booking_count: 2,
        }),
        ApiError::Conflict { .. }
    ));
    assert!(matches!(
        translate_persistence_error(PersistenceError::QueryFailed(String::from("disk I/O"))),
        ApiError::Internal { .. }
    ));
}
