pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
pub use crate::state::AppState;

/// Build the full HTTP application over the given state.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security);
    let request_logging = state.config.api.enable_request_logging;

    let router = Router::new()
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        .route("/jwt", post(handlers::public::issue_token))
        .merge(product_routes())
        .merge(customer_routes())
        .merge(blog_routes())
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(CatchPanicLayer::custom(error::handle_panic)),
        );

    if request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn product_routes() -> Router<AppState> {
    use handlers::products;

    Router::new()
        .route("/products", get(products::list_products).post(products::create_product))
        .route("/products/:id", get(products::get_product).put(products::update_product))
        .route("/products/categories/:category", get(products::list_by_category))
        // GET lists by seller email, DELETE removes by product id
        .route(
            "/products/seller/:key",
            get(products::list_by_seller).delete(products::delete_product),
        )
        .route("/products/search/:text", get(products::search_products))
}

fn customer_routes() -> Router<AppState> {
    use handlers::{orders, wishlist};

    Router::new()
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route("/wishlist", post(wishlist::add_to_wishlist))
        .route("/wishlist/:email", get(wishlist::wishlist_by_email))
}

fn blog_routes() -> Router<AppState> {
    use handlers::blog;

    Router::new()
        .route("/blog", get(blog::list_posts))
        .route("/blog/:id", get(blog::get_post))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
