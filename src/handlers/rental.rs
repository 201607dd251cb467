//! Rental handlers: create and read.

use crate::error::AppError;
use crate::model::{Rental, RentalRequest};
use crate::response::{success_one, success_one_ok, SuccessOne};
use crate::service::RentalService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// POST /rentals
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<RentalRequest>,
) -> Result<(StatusCode, Json<SuccessOne<Rental>>), AppError> {
    let rental = RentalService::create_rental(&state.pool, &request).await?;
    tracing::info!(rental_id = rental.rental_id, inventory_id = rental.inventory_id, "rental created");
    Ok(success_one(rental))
}

/// GET /rentals/:id
pub async fn read(
    State(state): State<AppState>,
    Path(rental_id): Path<i32>,
) -> Result<(StatusCode, Json<SuccessOne<Rental>>), AppError> {
    let rental = RentalService::find_rental(&state.pool, rental_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("rental {}", rental_id)))?;
    Ok(success_one_ok(rental))
}
