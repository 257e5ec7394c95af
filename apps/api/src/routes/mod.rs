pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::generation::handlers;
use crate::state::AppState;
use crate::ui;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Browser form
        .route("/", get(ui::handle_index).post(ui::handle_generate_form))
        // JSON API
        .route(
            "/api/v1/professions/generate",
            post(handlers::handle_generate_professions),
        )
        .fallback(not_found)
        .with_state(state)
}
