pub mod browse;
pub mod cache;
pub mod config;
pub mod debounce;
pub mod disney;
pub mod error;
pub mod models;
pub mod routes;
pub mod score;
pub mod templates;

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::{cache::QueryCache, config::Config};

pub struct AppState {
    pub config: Arc<Config>,
    pub cache: QueryCache,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/characters", get(routes::characters))
        .route("/character/{name}", get(routes::character_detail))
        .route("/compare", get(routes::compare))
        .route("/api/character", get(routes::api_character))
        .with_state(state)
}
