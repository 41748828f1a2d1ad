// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP routes over the API operations.
//!
//! Every handler locks the shared persistence for the duration of one API
//! call, so booking checks and their writes never interleave.

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use hotel_desk_api::{
    ApiError, ArrivalsRequest, AvailableRoomsRequest, BookingDetailsResponse, BookingInfo,
    BookingRequestBody, BookingTransitionResponse, CreateRoomRequest, CsvImportResult, CsvKind,
    CsvPreviewResult, GuestHistoryResponse, GuestInfo, GuestRequest, ListBookingsRequest,
    ListBookingsResponse, ListGuestsResponse, ListRoomsRequest, ListRoomsResponse,
    PriceRangeRequest, RecordPaymentRequest, RoomInfo, SetAvailabilityRequest, UpdateRoomRequest,
};
use hotel_desk_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::extract::{ApiJson, ApiPath, ApiQuery, ApiText};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub persistence: Arc<Mutex<Persistence>>,
    /// Source of the current date for check-in.
    pub today: fn() -> Date,
}

impl AppState {
    #[must_use]
    pub fn new(persistence: Persistence) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            today: system_today,
        }
    }
}

fn system_today() -> Date {
    OffsetDateTime::now_utc().date()
}

// ============================================================================
// Errors
// ============================================================================

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error kind.
    pub error: String,
    pub message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.kind.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let (status, kind): (StatusCode, &'static str) = match &err {
            ApiError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "invalid_input"),
            ApiError::InvalidCsvFormat { .. } => (StatusCode::BAD_REQUEST, "invalid_csv"),
            ApiError::ResourceNotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            ApiError::DomainRuleViolation { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "domain_rule_violation")
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        };
        Self {
            status,
            kind,
            message: err.to_string(),
        }
    }
}

type HttpResult<T> = Result<Json<T>, HttpError>;

// ============================================================================
// Query parameters
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchQuery {
    /// Blank or missing lists every guest.
    #[serde(default)]
    q: String,
}

#[derive(Debug, Deserialize)]
struct EmailQuery {
    email: String,
}

#[derive(Debug, Deserialize)]
struct ImportQuery {
    #[serde(default)]
    preview: bool,
}

/// Body of a CSV upload response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportResponse {
    Preview(CsvPreviewResult),
    Import(CsvImportResult),
}

// ============================================================================
// Guests
// ============================================================================

async fn handle_create_guest(
    AxumState(app_state): AxumState<AppState>,
    ApiJson(request): ApiJson<GuestRequest>,
) -> Result<(StatusCode, Json<GuestInfo>), HttpError> {
    info!(email = %request.email, "Handling create_guest request");
    let mut persistence = app_state.persistence.lock().await;
    let guest: GuestInfo = hotel_desk_api::create_guest(&mut persistence, &request)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(guest)))
}

async fn handle_list_guests(
    AxumState(app_state): AxumState<AppState>,
) -> HttpResult<ListGuestsResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::list_guests(&mut persistence)?))
}

async fn handle_get_guest(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(guest_id): ApiPath<i64>,
) -> HttpResult<GuestInfo> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::get_guest(&mut persistence, guest_id)?))
}

async fn handle_update_guest(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(guest_id): ApiPath<i64>,
    ApiJson(request): ApiJson<GuestRequest>,
) -> HttpResult<GuestInfo> {
    info!(guest_id, "Handling update_guest request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::update_guest(
        &mut persistence,
        guest_id,
        &request,
    )?))
}

async fn handle_delete_guest(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(guest_id): ApiPath<i64>,
) -> Result<StatusCode, HttpError> {
    info!(guest_id, "Handling delete_guest request");
    let mut persistence = app_state.persistence.lock().await;
    hotel_desk_api::delete_guest(&mut persistence, guest_id)?;
    drop(persistence);
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_search_guests(
    AxumState(app_state): AxumState<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> HttpResult<ListGuestsResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::search_guests(
        &mut persistence,
        &query.q,
    )?))
}

async fn handle_lookup_guest(
    AxumState(app_state): AxumState<AppState>,
    ApiQuery(query): ApiQuery<EmailQuery>,
) -> HttpResult<GuestInfo> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::find_guest_by_email(
        &mut persistence,
        &query.email,
    )?))
}

async fn handle_list_vip_guests(
    AxumState(app_state): AxumState<AppState>,
) -> HttpResult<ListGuestsResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::list_vip_guests(&mut persistence)?))
}

async fn handle_guest_bookings(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(guest_id): ApiPath<i64>,
) -> HttpResult<ListBookingsResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::list_bookings_for_guest(
        &mut persistence,
        guest_id,
    )?))
}

async fn handle_guest_history(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(guest_id): ApiPath<i64>,
) -> HttpResult<GuestHistoryResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::get_guest_history(
        &mut persistence,
        guest_id,
    )?))
}

// ============================================================================
// Rooms
// ============================================================================

async fn handle_create_room(
    AxumState(app_state): AxumState<AppState>,
    ApiJson(request): ApiJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomInfo>), HttpError> {
    info!(room_number = request.room_number, "Handling create_room request");
    let mut persistence = app_state.persistence.lock().await;
    let room: RoomInfo = hotel_desk_api::create_room(&mut persistence, &request)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(room)))
}

async fn handle_list_rooms(
    AxumState(app_state): AxumState<AppState>,
    ApiQuery(request): ApiQuery<ListRoomsRequest>,
) -> HttpResult<ListRoomsResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::list_rooms(&mut persistence, &request)?))
}

async fn handle_get_room(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(room_number): ApiPath<i64>,
) -> HttpResult<RoomInfo> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::get_room(&mut persistence, room_number)?))
}

async fn handle_update_room(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(room_number): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateRoomRequest>,
) -> HttpResult<RoomInfo> {
    info!(room_number, "Handling update_room request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::update_room(
        &mut persistence,
        room_number,
        &request,
    )?))
}

async fn handle_set_room_availability(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(room_number): ApiPath<i64>,
    ApiJson(request): ApiJson<SetAvailabilityRequest>,
) -> HttpResult<RoomInfo> {
    info!(
        room_number,
        is_available = request.is_available,
        "Handling set_room_availability request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::set_room_availability(
        &mut persistence,
        room_number,
        &request,
    )?))
}

async fn handle_delete_room(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(room_number): ApiPath<i64>,
) -> Result<StatusCode, HttpError> {
    info!(room_number, "Handling delete_room request");
    let mut persistence = app_state.persistence.lock().await;
    hotel_desk_api::delete_room(&mut persistence, room_number)?;
    drop(persistence);
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_available_rooms(
    AxumState(app_state): AxumState<AppState>,
    ApiQuery(request): ApiQuery<AvailableRoomsRequest>,
) -> HttpResult<ListRoomsResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::list_available_rooms(
        &mut persistence,
        &request,
    )?))
}

async fn handle_rooms_by_price(
    AxumState(app_state): AxumState<AppState>,
    ApiQuery(request): ApiQuery<PriceRangeRequest>,
) -> HttpResult<ListRoomsResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::list_rooms_by_price_range(
        &mut persistence,
        &request,
    )?))
}

// ============================================================================
// Bookings
// ============================================================================

async fn handle_create_booking(
    AxumState(app_state): AxumState<AppState>,
    ApiJson(body): ApiJson<BookingRequestBody>,
) -> Result<(StatusCode, Json<BookingInfo>), HttpError> {
    info!(
        guest_id = body.guest_id,
        room_number = body.room_number,
        "Handling create_booking request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let booking: BookingInfo = hotel_desk_api::create_booking(&mut persistence, &body)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn handle_list_bookings(
    AxumState(app_state): AxumState<AppState>,
    ApiQuery(request): ApiQuery<ListBookingsRequest>,
) -> HttpResult<ListBookingsResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::list_bookings(
        &mut persistence,
        &request,
    )?))
}

async fn handle_arrivals(
    AxumState(app_state): AxumState<AppState>,
    ApiQuery(request): ApiQuery<ArrivalsRequest>,
) -> HttpResult<ListBookingsResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::list_arrivals(
        &mut persistence,
        &request,
    )?))
}

async fn handle_get_booking(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(booking_id): ApiPath<i64>,
) -> HttpResult<BookingDetailsResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::get_booking(
        &mut persistence,
        booking_id,
    )?))
}

async fn handle_update_booking(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(booking_id): ApiPath<i64>,
    ApiJson(body): ApiJson<BookingRequestBody>,
) -> HttpResult<BookingInfo> {
    info!(booking_id, "Handling update_booking request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::update_booking(
        &mut persistence,
        booking_id,
        &body,
    )?))
}

async fn handle_delete_booking(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(booking_id): ApiPath<i64>,
) -> Result<StatusCode, HttpError> {
    info!(booking_id, "Handling delete_booking request");
    let mut persistence = app_state.persistence.lock().await;
    hotel_desk_api::delete_booking(&mut persistence, booking_id)?;
    drop(persistence);
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_check_in(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(booking_id): ApiPath<i64>,
) -> HttpResult<BookingTransitionResponse> {
    let today: Date = (app_state.today)();
    info!(booking_id, %today, "Handling check_in request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::check_in(
        &mut persistence,
        booking_id,
        today,
    )?))
}

async fn handle_check_out(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(booking_id): ApiPath<i64>,
) -> HttpResult<BookingTransitionResponse> {
    info!(booking_id, "Handling check_out request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::check_out(&mut persistence, booking_id)?))
}

async fn handle_cancel(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(booking_id): ApiPath<i64>,
) -> HttpResult<BookingTransitionResponse> {
    info!(booking_id, "Handling cancel request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::cancel_booking(
        &mut persistence,
        booking_id,
    )?))
}

async fn handle_payment(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(booking_id): ApiPath<i64>,
    ApiJson(request): ApiJson<RecordPaymentRequest>,
) -> HttpResult<BookingTransitionResponse> {
    info!(booking_id, "Handling payment request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(hotel_desk_api::record_payment(
        &mut persistence,
        booking_id,
        &request,
    )?))
}

// ============================================================================
// Import
// ============================================================================

/// Handler for POST `/import/{kind}`.
///
/// The request body is the raw CSV text. With `?preview=true` the rows are
/// only validated.
async fn handle_import(
    AxumState(app_state): AxumState<AppState>,
    ApiPath(kind): ApiPath<String>,
    ApiQuery(query): ApiQuery<ImportQuery>,
    ApiText(body): ApiText,
) -> HttpResult<ImportResponse> {
    let kind: CsvKind = kind.parse()?;
    info!(
        kind = kind.as_str(),
        preview = query.preview,
        bytes = body.len(),
        "Handling import request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response: ImportResponse = if query.preview {
        ImportResponse::Preview(hotel_desk_api::preview_csv(&mut persistence, kind, &body)?)
    } else {
        ImportResponse::Import(hotel_desk_api::import_csv(&mut persistence, kind, &body)?)
    };
    drop(persistence);
    Ok(Json(response))
}

/// Builds the application router.
#[must_use]
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/guests", post(handle_create_guest).get(handle_list_guests))
        .route("/guests/search", get(handle_search_guests))
        .route("/guests/lookup", get(handle_lookup_guest))
        .route("/guests/vip", get(handle_list_vip_guests))
        .route(
            "/guests/{id}",
            get(handle_get_guest)
                .put(handle_update_guest)
                .delete(handle_delete_guest),
        )
        .route("/guests/{id}/bookings", get(handle_guest_bookings))
        .route("/guests/{id}/history", get(handle_guest_history))
        .route("/rooms", post(handle_create_room).get(handle_list_rooms))
        .route("/rooms/available", get(handle_available_rooms))
        .route("/rooms/price_range", get(handle_rooms_by_price))
        .route(
            "/rooms/{number}",
            get(handle_get_room)
                .put(handle_update_room)
                .delete(handle_delete_room),
        )
        .route(
            "/rooms/{number}/availability",
            put(handle_set_room_availability),
        )
        .route(
            "/bookings",
            post(handle_create_booking).get(handle_list_bookings),
        )
        .route("/bookings/arrivals", get(handle_arrivals))
        .route(
            "/bookings/{id}",
            get(handle_get_booking)
                .put(handle_update_booking)
                .delete(handle_delete_booking),
        )
        .route("/bookings/{id}/check_in", post(handle_check_in))
        .route("/bookings/{id}/check_out", post(handle_check_out))
        .route("/bookings/{id}/cancel", post(handle_cancel))
        .route("/bookings/{id}/payment", post(handle_payment))
        .route("/import/{kind}", post(handle_import))
        .with_state(app_state)
}
