//! RentalService: transactional rental creation and lookup.

pub mod rental;

pub use rental::RentalService;
