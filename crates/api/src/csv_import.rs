// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV preview and bulk import for rooms, guests and bookings.
//!
//! Headers are matched case-insensitively with spaces treated as
//! underscores, so `Room Number` and `room_number` are the same column.
//! Column order does not matter and unknown columns are ignored.
//!
//! Preview validates every row against the CSV itself and the stored data
//! without writing anything. Import persists the valid rows and reports the
//! rest. Rooms are written as a single all-or-nothing batch; guests and
//! bookings are written row by row.

use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

use hotel_desk_domain::{
    Booking, BookingStatus, Guest, Money, Room, RoomStatus, RoomType, StayRange, find_conflict,
    find_guest_by_id, validate_guest_fields, validate_party_size, validate_room_fields,
};
use hotel_desk_persistence::Persistence;

use crate::error::ApiError;

const ROOM_HEADERS: &[&str] = &["room_number", "room_type", "price_per_night", "max_occupancy"];
const GUEST_HEADERS: &[&str] = &["first_name", "last_name", "email"];
const BOOKING_HEADERS: &[&str] = &[
    "guest_id",
    "room_number",
    "check_in_date",
    "check_out_date",
    "number_of_guests",
];

/// Failure to read the CSV as a whole (as opposed to a bad row).
#[derive(Debug, Error)]
pub enum CsvReadError {
    #[error("Failed to read CSV headers: {0}")]
    Headers(#[from] csv::Error),
    #[error("Missing required headers: {}", .0.join(", "))]
    MissingHeaders(Vec<String>),
}

impl From<CsvReadError> for ApiError {
    fn from(err: CsvReadError) -> Self {
        Self::InvalidCsvFormat {
            reason: err.to_string(),
        }
    }
}

/// Which record type a CSV file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsvKind {
    Rooms,
    Guests,
    Bookings,
}

impl CsvKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rooms => "rooms",
            Self::Guests => "guests",
            Self::Bookings => "bookings",
        }
    }
}

impl FromStr for CsvKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rooms" | "room" => Ok(Self::Rooms),
            "guests" | "guest" => Ok(Self::Guests),
            "bookings" | "booking" => Ok(Self::Bookings),
            other => Err(ApiError::invalid_input(
                "kind",
                format!("Unknown import kind '{other}'. Must be rooms, guests, or bookings"),
            )),
        }
    }
}

/// Outcome of one CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsvRowStatus {
    /// Row passed validation (preview only).
    Valid,
    /// Row failed validation and was not written.
    Invalid,
    /// Row was written.
    Imported,
    /// Row was valid but the write failed.
    Failed,
}

/// A single row result from CSV preview or import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRowResult {
    /// The row number (1-based, excluding header).
    pub row_number: usize,
    /// Short label for the record the row describes, when it could be read.
    pub description: Option<String>,
    pub status: CsvRowStatus,
    pub errors: Vec<String>,
}

/// Result of CSV preview validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvPreviewResult {
    pub rows: Vec<CsvRowResult>,
    pub total_rows: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
}

/// Result of a CSV import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvImportResult {
    pub rows: Vec<CsvRowResult>,
    pub total_rows: usize,
    pub imported_count: usize,
    /// Rows that were invalid or whose write failed.
    pub failed_count: usize,
}

impl CsvPreviewResult {
    fn from_rows(rows: Vec<CsvRowResult>) -> Self {
        let total_rows: usize = rows.len();
        let valid_count: usize = rows
            .iter()
            .filter(|r| r.status == CsvRowStatus::Valid)
            .count();
        Self {
            rows,
            total_rows,
            valid_count,
            invalid_count: total_rows - valid_count,
        }
    }
}

impl CsvImportResult {
    fn from_rows(rows: Vec<CsvRowResult>) -> Self {
        let total_rows: usize = rows.len();
        let imported_count: usize = rows
            .iter()
            .filter(|r| r.status == CsvRowStatus::Imported)
            .count();
        Self {
            rows,
            total_rows,
            imported_count,
            failed_count: total_rows - imported_count,
        }
    }
}

// ============================================================================
// Reading
// ============================================================================

/// Normalizes a CSV header string for case-insensitive, whitespace-tolerant matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Accepts `1/0`, `true/false` and `yes/no` in any case.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

struct CsvTable {
    header_map: HashMap<String, usize>,
    records: Vec<Result<StringRecord, String>>,
}

fn read_table(csv_content: &str, required: &[&str]) -> Result<CsvTable, CsvReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(csv_content.as_bytes());

    let headers: StringRecord = reader.headers()?.clone();
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| (normalize_header(header), idx))
        .collect();

    let missing: Vec<String> = required
        .iter()
        .filter(|name| !header_map.contains_key(**name))
        .map(|name| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CsvReadError::MissingHeaders(missing));
    }

    let records: Vec<Result<StringRecord, String>> = reader
        .records()
        .map(|r| r.map_err(|e| format!("CSV parse error: {e}")))
        .collect();

    Ok(CsvTable {
        header_map,
        records,
    })
}

/// Field access for one record, collecting errors as it goes.
struct RowFields<'a> {
    record: &'a StringRecord,
    header_map: &'a HashMap<String, usize>,
    errors: Vec<String>,
}

impl<'a> RowFields<'a> {
    const fn new(record: &'a StringRecord, header_map: &'a HashMap<String, usize>) -> Self {
        Self {
            record,
            header_map,
            errors: Vec::new(),
        }
    }

    /// Returns the trimmed value, or `None` when the column is absent or blank.
    fn get(&self, name: &str) -> Option<&'a str> {
        self.header_map
            .get(name)
            .and_then(|&idx| self.record.get(idx))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn required(&mut self, name: &str) -> Option<&'a str> {
        let value: Option<&'a str> = self.get(name);
        if value.is_none() {
            self.errors
                .push(format!("{name}: required field is missing or empty"));
        }
        value
    }

    fn parse_with<T, E: std::fmt::Display>(
        &mut self,
        name: &str,
        value: Option<&str>,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> Option<T> {
        let value: &str = value?;
        match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                self.errors.push(format!("{name}: {e}"));
                None
            }
        }
    }

    fn number<T: FromStr>(&mut self, name: &str, value: Option<&str>) -> Option<T> {
        let value: &str = value?;
        value.parse::<T>().map_or_else(
            |_| {
                self.errors.push(format!("{name}: invalid number '{value}'"));
                None
            },
            Some,
        )
    }

    fn required_number<T: FromStr>(&mut self, name: &str) -> Option<T> {
        let value: Option<&str> = self.required(name);
        self.number(name, value)
    }

    fn optional_number<T: FromStr>(&mut self, name: &str) -> Option<T> {
        let value: Option<&str> = self.get(name);
        self.number(name, value)
    }

    fn flag(&mut self, name: &str, default: bool) -> bool {
        match self.get(name) {
            None => default,
            Some(value) => parse_bool(value).unwrap_or_else(|| {
                self.errors.push(format!(
                    "{name}: invalid boolean '{value}' (use 1/0, true/false or yes/no)"
                ));
                default
            }),
        }
    }
}

/// A row after parsing and validation. `value` is `Some` only when `errors` is empty.
struct ParsedRow<T> {
    row_number: usize,
    description: Option<String>,
    value: Option<T>,
    errors: Vec<String>,
}

impl<T> ParsedRow<T> {
    fn new(
        row_number: usize,
        description: Option<String>,
        value: Option<T>,
        errors: Vec<String>,
    ) -> Self {
        let value: Option<T> = if errors.is_empty() { value } else { None };
        Self {
            row_number,
            description,
            value,
            errors,
        }
    }

    fn unreadable(row_number: usize, error: String) -> Self {
        Self {
            row_number,
            description: None,
            value: None,
            errors: vec![error],
        }
    }

    fn reject(&mut self, error: String) {
        self.errors.push(error);
        self.value = None;
    }

    fn into_preview(self) -> CsvRowResult {
        let status: CsvRowStatus = if self.value.is_some() {
            CsvRowStatus::Valid
        } else {
            CsvRowStatus::Invalid
        };
        CsvRowResult {
            row_number: self.row_number,
            description: self.description,
            status,
            errors: self.errors,
        }
    }

    fn into_import(self, outcome: Result<(), String>) -> CsvRowResult {
        let (status, errors): (CsvRowStatus, Vec<String>) = match (&self.value, outcome) {
            (None, _) => (CsvRowStatus::Invalid, self.errors),
            (Some(_), Ok(())) => (CsvRowStatus::Imported, Vec::new()),
            (Some(_), Err(e)) => (CsvRowStatus::Failed, vec![e]),
        };
        CsvRowResult {
            row_number: self.row_number,
            description: self.description,
            status,
            errors,
        }
    }
}

/// Parses every record of a table with `parse`, which returns the value and
/// a label for the row.
fn parse_table<T>(
    table: &CsvTable,
    mut parse: impl FnMut(&mut RowFields<'_>) -> (Option<String>, Option<T>),
) -> Vec<ParsedRow<T>> {
    table
        .records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let row_number: usize = idx + 1;
            match record {
                Ok(record) => {
                    let mut fields: RowFields<'_> = RowFields::new(record, &table.header_map);
                    let (description, value): (Option<String>, Option<T>) = parse(&mut fields);
                    ParsedRow::new(row_number, description, value, fields.errors)
                }
                Err(e) => ParsedRow::unreadable(row_number, e.clone()),
            }
        })
        .collect()
}

// ============================================================================
// Rooms
// ============================================================================

fn parse_room_row(fields: &mut RowFields<'_>) -> (Option<String>, Option<Room>) {
    let description: Option<String> = fields.get("room_number").map(|n| format!("Room {n}"));

    let room_number: Option<i64> = fields.required_number("room_number");
    let type_value: Option<&str> = fields.required("room_type");
    let room_type: Option<RoomType> =
        fields.parse_with("room_type", type_value, RoomType::from_str);
    let price_value: Option<&str> = fields.required("price_per_night");
    let price: Option<Money> = fields.parse_with("price_per_night", price_value, Money::parse);
    let max_occupancy: Option<u32> = fields.required_number("max_occupancy");
    let has_balcony: bool = fields.flag("has_balcony", false);
    let is_available: bool = fields.flag("is_available", true);
    let status_value: Option<&str> = fields.get("status");
    let status: RoomStatus = fields
        .parse_with("status", status_value, RoomStatus::from_str)
        .unwrap_or(RoomStatus::Clean);
    let amenities: &str = fields.get("amenities").unwrap_or_default();

    let (Some(room_number), Some(room_type), Some(price), Some(max_occupancy)) =
        (room_number, room_type, price, max_occupancy)
    else {
        return (description, None);
    };
    if !fields.errors.is_empty() {
        return (description, None);
    }

    let mut room: Room = Room::new(room_number, room_type, price, max_occupancy, has_balcony);
    room.amenities = Room::parse_amenities(amenities);
    room.is_available = is_available;
    room.status = status;

    if let Err(e) = validate_room_fields(&room) {
        fields.errors.push(format!("validation: {e}"));
        return (description, None);
    }
    (description, Some(room))
}

fn parse_rooms(
    persistence: &mut Persistence,
    csv_content: &str,
) -> Result<Vec<ParsedRow<Room>>, ApiError> {
    let table: CsvTable = read_table(csv_content, ROOM_HEADERS)?;
    let existing: HashSet<i64> = persistence
        .list_rooms()?
        .iter()
        .map(|r| r.room_number)
        .collect();

    let mut rows: Vec<ParsedRow<Room>> = parse_table(&table, parse_room_row);
    let mut seen: HashSet<i64> = HashSet::new();
    for row in &mut rows {
        let Some(number) = row.value.as_ref().map(|r| r.room_number) else {
            continue;
        };
        if existing.contains(&number) {
            row.reject(format!("room_number: room {number} already exists"));
        } else if !seen.insert(number) {
            row.reject(format!(
                "room_number: duplicate within CSV - room {number} appears multiple times"
            ));
        }
    }
    Ok(rows)
}

/// Validates room CSV rows without writing.
///
/// # Errors
///
/// Returns `InvalidCsvFormat` if the headers cannot be read or a required
/// column is missing.
pub fn preview_rooms_csv(
    persistence: &mut Persistence,
    csv_content: &str,
) -> Result<CsvPreviewResult, ApiError> {
    let rows: Vec<ParsedRow<Room>> = parse_rooms(persistence, csv_content)?;
    Ok(CsvPreviewResult::from_rows(
        rows.into_iter().map(ParsedRow::into_preview).collect(),
    ))
}

/// Imports the valid room rows as one batch.
///
/// If the batch write fails no room is stored and every valid row is
/// reported as failed.
///
/// # Errors
///
/// Returns `InvalidCsvFormat` for unreadable headers.
pub fn import_rooms_csv(
    persistence: &mut Persistence,
    csv_content: &str,
) -> Result<CsvImportResult, ApiError> {
    let rows: Vec<ParsedRow<Room>> = parse_rooms(persistence, csv_content)?;
    let rooms: Vec<Room> = rows.iter().filter_map(|r| r.value.clone()).collect();

    let outcome: Result<(), String> = if rooms.is_empty() {
        Ok(())
    } else {
        match persistence.create_rooms_batch(&rooms) {
            Ok(count) => {
                info!(count, "Imported rooms from CSV");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Room CSV batch rolled back");
                Err(e.to_string())
            }
        }
    };

    Ok(CsvImportResult::from_rows(
        rows.into_iter()
            .map(|row| row.into_import(outcome.clone()))
            .collect(),
    ))
}

// ============================================================================
// Guests
// ============================================================================

fn parse_guest_row(fields: &mut RowFields<'_>) -> (Option<String>, Option<Guest>) {
    let description: Option<String> = fields.get("email").map(str::to_lowercase);

    let guest_id: Option<i64> = fields.optional_number("guest_id");
    let first_name: Option<&str> = fields.required("first_name");
    let last_name: Option<&str> = fields.required("last_name");
    let email: Option<&str> = fields.required("email");
    let phone: &str = fields.get("phone").unwrap_or_default();
    let loyalty_points: u32 = fields.optional_number("loyalty_points").unwrap_or(0);
    let nationality: &str = fields.get("nationality").unwrap_or_default();

    if let Some(id) = guest_id
        && id <= 0
    {
        fields
            .errors
            .push(format!("guest_id: must be positive, got {id}"));
    }

    let (Some(first_name), Some(last_name), Some(email)) = (first_name, last_name, email) else {
        return (description, None);
    };
    if !fields.errors.is_empty() {
        return (description, None);
    }

    let mut guest: Guest = Guest::new(
        first_name,
        last_name,
        email,
        phone,
        loyalty_points,
        nationality,
    );
    guest.guest_id = guest_id;

    if let Err(e) = validate_guest_fields(&guest) {
        fields.errors.push(format!("validation: {e}"));
        return (description, None);
    }
    (description, Some(guest))
}

fn parse_guests(
    persistence: &mut Persistence,
    csv_content: &str,
) -> Result<Vec<ParsedRow<Guest>>, ApiError> {
    let table: CsvTable = read_table(csv_content, GUEST_HEADERS)?;
    let stored: Vec<Guest> = persistence.list_guests()?;
    let mut emails: HashSet<String> = stored.iter().map(|g| g.email.clone()).collect();
    let mut ids: HashSet<i64> = stored.iter().filter_map(|g| g.guest_id).collect();

    let mut rows: Vec<ParsedRow<Guest>> = parse_table(&table, parse_guest_row);
    for row in &mut rows {
        let Some((email, guest_id)) = row.value.as_ref().map(|g| (g.email.clone(), g.guest_id))
        else {
            continue;
        };
        if emails.contains(&email) {
            row.reject(format!("email: '{email}' is already registered"));
            continue;
        }
        if let Some(id) = guest_id
            && ids.contains(&id)
        {
            row.reject(format!("guest_id: guest {id} already exists"));
            continue;
        }
        emails.insert(email);
        if let Some(id) = guest_id {
            ids.insert(id);
        }
    }
    Ok(rows)
}

/// Validates guest CSV rows without writing.
///
/// Emails and explicit IDs must be unique both within the file and
/// against stored guests.
///
/// # Errors
///
/// Returns `InvalidCsvFormat` for unreadable headers.
pub fn preview_guests_csv(
    persistence: &mut Persistence,
    csv_content: &str,
) -> Result<CsvPreviewResult, ApiError> {
    let rows: Vec<ParsedRow<Guest>> = parse_guests(persistence, csv_content)?;
    Ok(CsvPreviewResult::from_rows(
        rows.into_iter().map(ParsedRow::into_preview).collect(),
    ))
}

/// Imports the valid guest rows one at a time.
///
/// # Errors
///
/// Returns `InvalidCsvFormat` for unreadable headers.
pub fn import_guests_csv(
    persistence: &mut Persistence,
    csv_content: &str,
) -> Result<CsvImportResult, ApiError> {
    let rows: Vec<ParsedRow<Guest>> = parse_guests(persistence, csv_content)?;
    let mut results: Vec<CsvRowResult> = Vec::with_capacity(rows.len());

    for row in rows {
        let outcome: Result<(), String> = match &row.value {
            Some(guest) => persistence
                .create_guest(guest)
                .map(|_| ())
                .map_err(|e| e.to_string()),
            None => Ok(()),
        };
        results.push(row.into_import(outcome));
    }

    let result: CsvImportResult = CsvImportResult::from_rows(results);
    info!(
        imported = result.imported_count,
        failed = result.failed_count,
        "Imported guests from CSV"
    );
    Ok(result)
}

// ============================================================================
// Bookings
// ============================================================================

/// A booking row before it is checked against stored guests and rooms.
struct BookingRow {
    booking_id: Option<i64>,
    guest_id: i64,
    room_number: i64,
    stay: StayRange,
    number_of_guests: u32,
    status: BookingStatus,
}

fn parse_booking_row(fields: &mut RowFields<'_>) -> (Option<String>, Option<BookingRow>) {
    let description: Option<String> = match (fields.get("guest_id"), fields.get("room_number")) {
        (Some(guest), Some(room)) => Some(format!("Guest {guest} in room {room}")),
        _ => None,
    };

    let booking_id: Option<i64> = fields.optional_number("booking_id");
    let guest_id: Option<i64> = fields.required_number("guest_id");
    let room_number: Option<i64> = fields.required_number("room_number");
    let check_in: Option<&str> = fields.required("check_in_date");
    let check_out: Option<&str> = fields.required("check_out_date");
    let number_of_guests: Option<u32> = fields.required_number("number_of_guests");
    let status_value: Option<&str> = fields.get("status");
    let status: BookingStatus = fields
        .parse_with("status", status_value, BookingStatus::from_str)
        .unwrap_or(BookingStatus::Confirmed);

    let stay: Option<StayRange> = match (check_in, check_out) {
        (Some(check_in), Some(check_out)) => {
            fields.parse_with("dates", Some(check_in), |ci| StayRange::parse(ci, check_out))
        }
        _ => None,
    };

    let (Some(guest_id), Some(room_number), Some(stay), Some(number_of_guests)) =
        (guest_id, room_number, stay, number_of_guests)
    else {
        return (description, None);
    };

    let row: BookingRow = BookingRow {
        booking_id,
        guest_id,
        room_number,
        stay,
        number_of_guests,
        status,
    };
    (description, Some(row))
}

/// Stored state a booking row is checked against.
struct BookingContext {
    /// Ordered by ID.
    guests: Vec<Guest>,
    rooms: HashMap<i64, Room>,
    /// Stored bookings plus the valid rows seen so far.
    bookings: Vec<Booking>,
    booking_ids: HashSet<i64>,
}

impl BookingContext {
    fn load(persistence: &mut Persistence) -> Result<Self, ApiError> {
        let guests: Vec<Guest> = persistence.list_guests()?;
        let rooms: HashMap<i64, Room> = persistence
            .list_rooms()?
            .into_iter()
            .map(|r| (r.room_number, r))
            .collect();
        let bookings: Vec<Booking> = persistence.list_bookings()?;
        let booking_ids: HashSet<i64> = bookings.iter().filter_map(|b| b.booking_id).collect();
        Ok(Self {
            guests,
            rooms,
            bookings,
            booking_ids,
        })
    }

    /// Turns a parsed row into a priced booking, or explains why it cannot be stored.
    fn resolve(&mut self, row: &BookingRow) -> Result<Booking, String> {
        if find_guest_by_id(&self.guests, row.guest_id).is_none() {
            return Err(format!("guest_id: guest {} does not exist", row.guest_id));
        }
        let room: &Room = self
            .rooms
            .get(&row.room_number)
            .ok_or_else(|| format!("room_number: room {} does not exist", row.room_number))?;
        validate_party_size(room, row.number_of_guests)
            .map_err(|e| format!("number_of_guests: {e}"))?;
        let total_price: Money = room
            .price_for_stay(&row.stay)
            .map_err(|e| format!("total_price: {e}"))?;

        if let Some(id) = row.booking_id
            && self.booking_ids.contains(&id)
        {
            return Err(format!("booking_id: booking {id} already exists"));
        }

        if row.status.blocks_room()
            && let Some(conflict) =
                find_conflict(row.room_number, &row.stay, &self.bookings, None)
        {
            let holder: String = conflict
                .booking_id
                .map_or_else(|| String::from("an earlier row"), |id| format!("booking {id}"));
            return Err(format!(
                "room_number: room {} is already booked for {} by {holder}",
                row.room_number, row.stay
            ));
        }

        if let Some(id) = row.booking_id {
            self.booking_ids.insert(id);
        }
        let booking: Booking = Booking {
            booking_id: row.booking_id,
            guest_id: row.guest_id,
            room_number: row.room_number,
            stay: row.stay,
            number_of_guests: row.number_of_guests,
            total_price,
            status: row.status,
            is_paid: false,
            payment_method: None,
        };
        self.bookings.push(booking.clone());
        Ok(booking)
    }
}

fn parse_bookings(
    persistence: &mut Persistence,
    csv_content: &str,
) -> Result<Vec<ParsedRow<Booking>>, ApiError> {
    let table: CsvTable = read_table(csv_content, BOOKING_HEADERS)?;
    let mut context: BookingContext = BookingContext::load(persistence)?;

    let parsed: Vec<ParsedRow<BookingRow>> = parse_table(&table, parse_booking_row);
    let rows: Vec<ParsedRow<Booking>> = parsed
        .into_iter()
        .map(|row| {
            let mut errors: Vec<String> = row.errors;
            let value: Option<Booking> = match row.value {
                Some(parsed) => match context.resolve(&parsed) {
                    Ok(booking) => Some(booking),
                    Err(e) => {
                        errors.push(e);
                        None
                    }
                },
                None => None,
            };
            ParsedRow::new(row.row_number, row.description, value, errors)
        })
        .collect();
    Ok(rows)
}

/// Validates booking CSV rows without writing.
///
/// The `total_price` column is ignored; prices are recomputed from the
/// room rate. Rows must reference stored guests and rooms, fit the room,
/// and not overlap stored bookings or earlier rows for the same room.
///
/// # Errors
///
/// Returns `InvalidCsvFormat` for unreadable headers.
pub fn preview_bookings_csv(
    persistence: &mut Persistence,
    csv_content: &str,
) -> Result<CsvPreviewResult, ApiError> {
    let rows: Vec<ParsedRow<Booking>> = parse_bookings(persistence, csv_content)?;
    Ok(CsvPreviewResult::from_rows(
        rows.into_iter().map(ParsedRow::into_preview).collect(),
    ))
}

/// Imports the valid booking rows one at a time.
///
/// Rooms with an imported checked-in booking are marked unavailable.
///
/// # Errors
///
/// Returns `InvalidCsvFormat` for unreadable headers.
pub fn import_bookings_csv(
    persistence: &mut Persistence,
    csv_content: &str,
) -> Result<CsvImportResult, ApiError> {
    let rows: Vec<ParsedRow<Booking>> = parse_bookings(persistence, csv_content)?;
    let mut results: Vec<CsvRowResult> = Vec::with_capacity(rows.len());

    for row in rows {
        let outcome: Result<(), String> = match &row.value {
            Some(booking) => store_imported_booking(persistence, booking),
            None => Ok(()),
        };
        results.push(row.into_import(outcome));
    }

    let result: CsvImportResult = CsvImportResult::from_rows(results);
    info!(
        imported = result.imported_count,
        failed = result.failed_count,
        "Imported bookings from CSV"
    );
    Ok(result)
}

fn store_imported_booking(persistence: &mut Persistence, booking: &Booking) -> Result<(), String> {
    persistence
        .insert_booking(booking)
        .map_err(|e| e.to_string())?;
    Ok(())
}

// ============================================================================
// Dispatch
// ============================================================================

/// Previews a CSV file of the given kind.
///
/// # Errors
///
/// Returns `InvalidCsvFormat` for unreadable headers.
pub fn preview_csv(
    persistence: &mut Persistence,
    kind: CsvKind,
    csv_content: &str,
) -> Result<CsvPreviewResult, ApiError> {
    match kind {
        CsvKind::Rooms => preview_rooms_csv(persistence, csv_content),
        CsvKind::Guests => preview_guests_csv(persistence, csv_content),
        CsvKind::Bookings => preview_bookings_csv(persistence, csv_content),
    }
}

/// Imports a CSV file of the given kind.
///
/// # Errors
///
/// Returns `InvalidCsvFormat` for unreadable headers.
pub fn import_csv(
    persistence: &mut Persistence,
    kind: CsvKind,
    csv_content: &str,
) -> Result<CsvImportResult, ApiError> {
    match kind {
        CsvKind::Rooms => import_rooms_csv(persistence, csv_content),
        CsvKind::Guests => import_guests_csv(persistence, csv_content),
        CsvKind::Bookings => import_bookings_csv(persistence, csv_content),
    }
}
