//! Request extractors.
//!
//! Axum's stock rejections render as plain text with assorted status codes.
//! These wrappers turn them into `AppError::Validation` so every client error
//! shares the JSON error body.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use wyr_common::AppError;

/// Poll id taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct PollId(pub i32);

impl<S> FromRequestParts<S> for PollId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        raw.parse()
            .map(Self)
            .map_err(|_| AppError::Validation(format!("invalid poll id: {raw}")))
    }
}

/// JSON body whose rejections become validation errors.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        Ok(Self(value))
    }
}
