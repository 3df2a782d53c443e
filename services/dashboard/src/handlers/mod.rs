pub mod health;
pub mod histogram;
pub mod size;

use axum::http::header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::AppError;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Serialize `value` with the headers every JSON route carries.
pub fn json_response<T: Serialize>(value: &T) -> Result<Response, AppError> {
    let body = serde_json::to_vec(value).map_err(anyhow::Error::from)?;
    Ok((
        [(CONTENT_TYPE, JSON_CONTENT_TYPE), (X_CONTENT_TYPE_OPTIONS, "nosniff")],
        body,
    )
        .into_response())
}
