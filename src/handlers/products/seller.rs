// handlers/products/seller.rs - GET /products/seller/:email

use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use crate::database::{models::Product, Collection};
use crate::error::ApiError;
use crate::filter::{Filter, JsonDocument, ListParams};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /products/seller/:email - a seller's own listings
///
/// The token's `email` claim must equal the path segment; anyone else gets 403.
pub async fn list_by_seller(
    State(state): State<AppState>,
    user: AuthUser,
    Path(email): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<JsonDocument>>, ApiError> {
    if let Err(e) = user.require_email(&email) {
        tracing::warn!("{:?} tried to list products of {}", user.email(), email);
        return Err(e.into());
    }

    let mut filter = Filter::by_field(Product::SELLER_EMAIL, email);
    filter.assign(&params, state.max_limit());

    let products = state.store.find(Collection::Products, &filter).await?;
    Ok(Json(products))
}
