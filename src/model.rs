//! Rental data shapes: the request consumed by the processor and the row it creates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Rental creation request: customer renting a specific inventory copy,
/// processed by a staff member. Referential validity is enforced by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct RentalRequest {
    pub customer_id: i32,
    pub inventory_id: i32,
    pub staff_id: i32,
}

/// Rental row. A rental with no `return_date` is open: the inventory copy is
/// out and cannot be rented again until the row is closed.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Rental {
    pub rental_id: i32,
    pub rental_date: DateTime<Utc>,
    pub inventory_id: i32,
    pub customer_id: i32,
    pub staff_id: i32,
    pub return_date: Option<DateTime<Utc>>,
}

impl Rental {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}
