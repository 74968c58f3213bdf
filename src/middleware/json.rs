use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` whose rejection is rendered as a structured `ApiError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
