// handlers/public/token.rs - POST /jwt

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::auth::Identity;
use crate::error::ApiError;
use crate::middleware::JsonBody;
use crate::state::AppState;

/// POST /jwt - sign whatever identity object the client posts
///
/// ```json
/// { "email": "seller@example.com" }
/// ```
///
/// responds with `{ "token": "eyJhbGciOiJIUzI1NiI..." }`. The identity is
/// not checked against any user store.
pub async fn issue_token(
    State(state): State<AppState>,
    JsonBody(claims): JsonBody<Value>,
) -> Result<Json<Value>, ApiError> {
    let identity = Identity::try_from(claims)?;
    let token = state.tokens.issue(&identity)?;

    tracing::info!("Issued token for {}", identity.email().unwrap_or("<no email>"));
    Ok(Json(json!({ "token": token })))
}
