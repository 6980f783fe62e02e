//! HTTP front end for the margin SDK.
//!
//! Exposes the router separately from `main` so it can be driven in tests
//! without binding a socket.

pub mod error;
pub mod refresh;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/produtos", get(routes::produtos::list_products))
        .route("/produtos/{cod_produto}", get(routes::produtos::get_product))
        .route(
            "/produtos/{cod_produto}/detalhes",
            get(routes::produtos::get_product_details),
        )
        .route("/status", get(routes::status::get_status))
        .route("/recarregar", post(routes::status::reload))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
