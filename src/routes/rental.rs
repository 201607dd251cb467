//! Rental routes.

use crate::handlers::rental::{create, read};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn rental_routes(state: AppState) -> Router {
    Router::new()
        .route("/rentals", post(create))
        .route("/rentals/:id", get(read))
        .with_state(state)
}
