pub mod config;
pub mod logging;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::state::AppState;

/// Full application router with the fixed fuzzy model loaded.
pub fn create_app(config: &Config) -> Result<axum::Router, kelelahan_fuzzy::FuzzyError> {
    let state = AppState::from_config(config)?;

    Ok(routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()))
}
