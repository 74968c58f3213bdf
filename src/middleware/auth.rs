use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::auth::{extract_bearer, AuthError, Identity, TokenService};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from a bearer token.
///
/// Taking `AuthUser` as a handler argument makes the route require a valid
/// token: a missing or bad credential rejects the request before the handler
/// body runs.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub identity: Identity,
}

impl AuthUser {
    pub fn email(&self) -> Option<&str> {
        self.identity.email()
    }

    /// Succeeds only when the token's identity carries exactly this email.
    pub fn require_email(&self, email: &str) -> Result<(), AuthError> {
        if self.email() == Some(email) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }

    /// The caller's email, which seller-scoped writes are keyed on.
    pub fn seller_email(&self) -> Result<&str, AuthError> {
        self.email().ok_or(AuthError::Forbidden)
    }
}

/// Validate the `Authorization` header against the token service.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<AuthUser, AuthError> {
    let token = extract_bearer(headers.get(AUTHORIZATION))?;
    let identity = tokens.verify(token)?;
    Ok(AuthUser { identity })
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, &state.tokens).map_err(|e| {
            tracing::debug!("{} {} rejected: {}", parts.method, parts.uri.path(), e);
            ApiError::from(e)
        })
    }
}
