//! HTTP API server

use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::storage::Store;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/pill-history",
            get(handlers::list_pill_history).post(handlers::create_pill_event),
        )
        .route(
            "/pill-schedule",
            get(handlers::list_pill_schedule)
                .post(handlers::create_pill_schedule)
                .delete(handlers::delete_pill_schedule),
        )
        .route("/pill-RESET", delete(handlers::reset_pill_history))
        .route(
            "/motion",
            get(handlers::list_motion_events).post(handlers::create_motion_event),
        )
        .route("/motion-RESET", delete(handlers::reset_motion_events))
        .route(
            "/recipe",
            get(handlers::get_recipe)
                .post(handlers::create_recipe)
                .delete(handlers::reset_recipes),
        )
        .route(
            "/step",
            get(handlers::find_steps).post(handlers::create_step),
        )
        .route(
            "/current-recipe",
            get(handlers::get_current_recipe)
                .post(handlers::set_current_recipe)
                .put(handlers::update_current_step)
                .delete(handlers::clear_current_recipe),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router over `store` with default instruction handling
pub fn create_store_router(store: Arc<Store>) -> Router {
    create_router(AppState::new(store))
}
