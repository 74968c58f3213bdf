// handlers/products/list.rs - public product reads

use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use crate::database::{models::Product, Collection};
use crate::error::ApiError;
use crate::filter::{Filter, JsonDocument, ListParams, NAME_FIELD};
use crate::state::AppState;

/// GET /products - all products, honoring `search`, `sort` and `limit`
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<JsonDocument>>, ApiError> {
    let mut filter = Filter::new();
    filter.assign(&params, state.max_limit());

    let products = state.store.find(Collection::Products, &filter).await?;
    Ok(Json(products))
}

/// GET /products/:id - one product, or `null` when nothing matches
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<JsonDocument>>, ApiError> {
    let filter = Filter::by_id(&id)?;
    let product = state.store.find_one(Collection::Products, &filter).await?;
    Ok(Json(product))
}

/// GET /products/categories/:category - products whose `subCategory` matches exactly
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<JsonDocument>>, ApiError> {
    let mut filter = Filter::by_field(Product::SUB_CATEGORY, category);
    filter.assign(&params, state.max_limit());

    let products = state.store.find(Collection::Products, &filter).await?;
    Ok(Json(products))
}

/// GET /products/search/:text - case-insensitive substring match on `name`
pub async fn search_products(
    State(state): State<AppState>,
    Path(text): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<JsonDocument>>, ApiError> {
    let mut filter = Filter::new();
    filter.search(NAME_FIELD, &text).assign(&params, state.max_limit());

    let products = state.store.find(Collection::Products, &filter).await?;
    Ok(Json(products))
}
