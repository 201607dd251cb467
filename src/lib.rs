//! Pagila rental service: rental-creation transactions over PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::AppError;
pub use model::{Rental, RentalRequest};
pub use response::{success_one, success_one_ok};
pub use routes::{common_routes_with_ready, rental_routes};
pub use service::RentalService;
pub use state::AppState;
pub use store::{connect_pool, ensure_rental_schema};
