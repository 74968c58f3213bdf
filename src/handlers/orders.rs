// handlers/orders.rs - /orders

use axum::{
    extract::{Query, State},
    response::Json,
};

use crate::database::{models::{self, Order}, Collection, InsertOneResult};
use crate::error::ApiError;
use crate::filter::{Filter, JsonDocument, ListParams};
use crate::middleware::JsonBody;
use crate::state::AppState;

/// POST /orders - record an order
pub async fn create_order(
    State(state): State<AppState>,
    JsonBody(order): JsonBody<Order>,
) -> Result<Json<InsertOneResult>, ApiError> {
    let document = models::to_document(&order)?;
    let result = state.store.insert_one(Collection::Orders, document).await?;

    tracing::info!("Order {} placed by {}", result.inserted_id, order.customer_email().unwrap_or("<no email>"));
    Ok(Json(result))
}

/// GET /orders
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<JsonDocument>>, ApiError> {
    let mut filter = Filter::new();
    filter.assign(&params, state.max_limit());

    Ok(Json(state.store.find(Collection::Orders, &filter).await?))
}
