//! Type aliases for the entity models used by fixtures.

pub type StudentModel = entity::student::Model;

pub type ProductModel = entity::product::Model;

pub type PackageModel = entity::package::Model;

pub type ReservationModel = entity::reservation::Model;
