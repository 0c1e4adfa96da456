pub mod params;
pub mod routes;

use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/quote", get(routes::get_quote))
        .route("/api/heatmap", get(routes::get_heatmap))
        .route("/api/curves", get(routes::get_curves))
        .route("/api/counters", get(routes::get_counters))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}
