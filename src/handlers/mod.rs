//! HTTP handlers for rental creation and lookup.

pub mod rental;
