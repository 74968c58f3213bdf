// handlers/mod.rs - Route handlers grouped by resource
//
// Every handler performs exactly one store operation and returns its result
// as JSON. Seller-scoped product routes take an `AuthUser` argument; all
// other routes are open.

pub mod blog;
pub mod orders;
pub mod products;
pub mod public;
pub mod wishlist;

use axum::http::Uri;

use crate::error::ApiError;

/// Fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
