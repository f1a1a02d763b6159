//! Fixture helpers for inserting test data.
//!
//! - `factory` - pure functions building in-memory models
//! - `student`, `product`, `package`, `reservation` - database inserts

pub mod factory;
pub mod package;
pub mod product;
pub mod reservation;
pub mod student;
