// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request extractors that report rejections in the API error format.
//!
//! Each wraps the matching axum extractor. A malformed path segment, query
//! string or body becomes an `invalid_input` error with a JSON body instead of
//! axum's plain-text rejection.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection, StringRejection},
    },
    http::request::Parts,
};
use hotel_desk_api::ApiError;
use tracing::debug;

use crate::routes::HttpError;

fn rejected(field: &str, reason: &str) -> HttpError {
    debug!(field, reason, "Rejected malformed request");
    HttpError::from(ApiError::invalid_input(field, reason))
}

/// Typed path parameters.
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejected("path", &rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Typed query string.
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejected("query", &rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// JSON request body.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| rejected("body", &rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// UTF-8 text body (CSV uploads).
pub struct ApiText(pub String);

impl<S> FromRequest<S> for ApiText
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let text: String = String::from_request(req, state)
            .await
            .map_err(|rejection: StringRejection| rejected("body", &rejection.body_text()))?;
        Ok(Self(text))
    }
}
