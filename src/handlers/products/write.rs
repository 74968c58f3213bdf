// handlers/products/write.rs - seller-owned product mutations
//
// Update and delete add `sellerEmail == caller` to the id filter, so a
// non-owner simply matches nothing.

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::database::{
    models::{self, Product, ProductUpdate},
    Collection, DeleteResult, InsertOneResult, UpdateResult,
};
use crate::error::ApiError;
use crate::filter::Filter;
use crate::middleware::{AuthUser, JsonBody};
use crate::state::AppState;

fn owned_by(id: &str, user: &AuthUser) -> Result<Filter, ApiError> {
    let mut filter = Filter::by_id(id)?;
    filter.where_eq(Product::SELLER_EMAIL, user.seller_email()?);
    Ok(filter)
}

/// POST /products - list a new product under the caller's email
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(product): JsonBody<Product>,
) -> Result<Json<InsertOneResult>, ApiError> {
    user.require_email(&product.seller_email)?;

    let document = models::to_document(&product)?;
    let result = state.store.insert_one(Collection::Products, document).await?;

    tracing::info!("Product {} created by {}", result.inserted_id, product.seller_email);
    Ok(Json(result))
}

/// PUT /products/:id - `$set` the updatable fields present in the body
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    JsonBody(update): JsonBody<ProductUpdate>,
) -> Result<Json<UpdateResult>, ApiError> {
    let fields = models::to_document(&update)?;
    if fields.is_empty() {
        return Err(ApiError::bad_request("No updatable fields in request body"));
    }

    let filter = owned_by(&id, &user)?;
    let result = state.store.update_one(Collection::Products, &filter, fields).await?;

    tracing::debug!("Update {} matched {} document(s)", id, result.matched_count);
    Ok(Json(result))
}

/// DELETE /products/seller/:id - remove one of the caller's products
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>, ApiError> {
    let filter = owned_by(&id, &user)?;
    let result = state.store.delete_one(Collection::Products, &filter).await?;

    tracing::info!("Delete {} removed {} document(s)", id, result.deleted_count);
    Ok(Json(result))
}
