pub mod common;
pub mod rental;

pub use common::common_routes_with_ready;
pub use rental::rental_routes;
