// handlers/wishlist.rs - /wishlist

use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use crate::database::{models::{self, WishlistEntry}, Collection, InsertOneResult};
use crate::error::ApiError;
use crate::filter::{Filter, JsonDocument, ListParams};
use crate::middleware::JsonBody;
use crate::state::AppState;

/// POST /wishlist - save a product for a customer
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    JsonBody(entry): JsonBody<WishlistEntry>,
) -> Result<Json<InsertOneResult>, ApiError> {
    let document = models::to_document(&entry)?;
    let result = state.store.insert_one(Collection::Wishlist, document).await?;
    Ok(Json(result))
}

/// GET /wishlist/:email - entries saved under `customerEmail`
pub async fn wishlist_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<JsonDocument>>, ApiError> {
    let mut filter = Filter::by_field(WishlistEntry::CUSTOMER_EMAIL, email);
    filter.assign(&params, state.max_limit());

    Ok(Json(state.store.find(Collection::Wishlist, &filter).await?))
}
