// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use hotel_desk_persistence::Persistence;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use time::{Date, macros::date};
use tower::ServiceExt;

use crate::routes::{AppState, build_router};

fn fixed_today() -> Date {
    date!(2026 - 07 - 01)
}

/// Router over a fresh in-memory database, with the clock pinned to 2026-07-01.
pub fn create_test_app() -> Router {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let mut app_state: AppState = AppState::new(persistence);
    app_state.today = fixed_today;
    build_router(app_state)
}

/// Sends one request and returns the status and raw body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Body) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: &Value,
) -> (StatusCode, Vec<u8>) {
    send(app, method, uri, Body::from(serde_json::to_string(body).unwrap())).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(app, "GET", uri, Body::empty()).await
}

pub fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap()
}

/// Creates Ada Lovelace plus a single (101) and a double (201) room.
/// Returns the guest ID.
pub async fn seed_hotel(app: &Router) -> i64 {
    let (status, body) = send_json(
        app,
        "POST",
        "/guests",
        &json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "phone": "555-0101",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let guest: Value = parse(&body);

    for (number, room_type, price, occupancy) in
        [(101, "Single", "100.00", 1), (201, "Double", "150.00", 2)]
    {
        let (status, _) = send_json(
            app,
            "POST",
            "/rooms",
            &json!({
                "room_number": number,
                "room_type": room_type,
                "price_per_night": price,
                "max_occupancy": occupancy,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    guest["guest_id"].as_i64().unwrap()
}
