use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppState;
use crate::handlers::api::{get_country, health, list_countries};
use crate::handlers::pages::{about, country, home};

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/countries", get(list_countries))
        .route("/countries/:code", get(get_country))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(home))
        .route("/country/:code", get(country))
        .route("/about", get(about))
        .route("/healthz", get(health))
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
