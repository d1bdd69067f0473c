//! REST API route definitions.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::web::handlers::tours;
use crate::web::state::WebAppState;

/// Build the API router with all REST endpoints.
pub fn api_routes() -> Router<WebAppState> {
    Router::new()
        // Tour routes
        .route("/tours", get(tours::list_public_tours))
        .route("/tours", post(tours::create_tour))
        .route("/tours/my", get(tours::list_my_tours))
        .route("/tours/{id}", put(tours::update_tour))
        .route("/tours/{id}", delete(tours::delete_tour))
}
