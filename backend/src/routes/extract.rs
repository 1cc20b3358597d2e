//! Extractors that reject with [`ApiError`]
//!
//! Axum's stock `Json` and `Path` rejections answer in plain text; these
//! wrappers keep every error in the `{"error": ...}` shape.

use crate::error::{ApiError, ApiResult};
use axum::extract::{FromRequest, FromRequestParts};
use gym_groups_shared::validation::describe;
use validator::Validate;

/// JSON body extractor
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Path parameter extractor
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

/// Run derive validation, mapping failures to a 400
pub fn validated<T: Validate>(value: T) -> ApiResult<T> {
    value
        .validate()
        .map_err(|e| ApiError::Validation(describe(&e)))?;
    Ok(value)
}
