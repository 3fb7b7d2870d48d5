mod error;
mod handlers;
mod server;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};

use super::Container;

pub use error::ApiError;
pub use handlers::{FetchProductParams, GenerateNamesBody};
pub use server::HttpServer;

/// Routes of the public API, with request logging applied to all of them.
pub fn app(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route("/api/fetch-basalam-product", get(handlers::fetch_product))
        .route("/api/generate-names", post(handlers::generate_names))
        .route("/api/stats", get(handlers::stats))
        .route("/health", get(handlers::health))
        .layer(middleware::from_fn(server::log_requests))
        .with_state(container)
}
