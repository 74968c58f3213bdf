// handlers/blog.rs - read-only /blog

use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use crate::database::Collection;
use crate::error::ApiError;
use crate::filter::{Filter, JsonDocument, ListParams};
use crate::state::AppState;

/// GET /blog
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<JsonDocument>>, ApiError> {
    let mut filter = Filter::new();
    filter.assign(&params, state.max_limit());

    Ok(Json(state.store.find(Collection::Blog, &filter).await?))
}

/// GET /blog/:id - the matching post wrapped in a list (empty when absent)
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<JsonDocument>>, ApiError> {
    let mut filter = Filter::by_id(&id)?;
    filter.assign(&params, state.max_limit());

    Ok(Json(state.store.find(Collection::Blog, &filter).await?))
}
