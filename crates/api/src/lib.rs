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
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod csv_import;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use csv_import::{
    CsvImportResult, CsvKind, CsvPreviewResult, CsvReadError, CsvRowResult, CsvRowStatus,
    import_bookings_csv, import_csv, import_guests_csv, import_rooms_csv, preview_bookings_csv,
    preview_csv, preview_guests_csv, preview_rooms_csv,
};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    cancel_booking, check_in, check_out, create_booking, create_guest, create_room,
    delete_booking, delete_guest, delete_room, find_guest_by_email, get_booking, get_guest,
    get_guest_history, get_room, list_arrivals, list_available_rooms, list_bookings,
    list_bookings_for_guest, list_guests, list_rooms, list_rooms_by_price_range,
    list_vip_guests, record_payment, search_guests, set_room_availability, update_booking,
    update_guest, update_room,
};
pub use request_response::{
    ArrivalsRequest, AvailableRoomsRequest, BookingDetailsResponse, BookingInfo,
    BookingRequestBody, BookingTransitionResponse, CreateRoomRequest, GuestHistoryResponse,
    GuestInfo, GuestRequest, ListBookingsRequest, ListBookingsResponse, ListGuestsResponse,
    ListRoomsRequest, ListRoomsResponse, PriceRangeRequest, RecordPaymentRequest, RoomInfo,
    SetAvailabilityRequest, UpdateRoomRequest,
};
