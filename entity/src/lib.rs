//! sea-orm entities for students, meal packages, products and reservations.

pub mod package;
pub mod package_product;
pub mod prelude;
pub mod product;
pub mod reservation;
pub mod student;
