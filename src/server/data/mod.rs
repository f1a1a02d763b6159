//! Data access layer repositories.
//!
//! Repositories wrap sea-orm queries per entity. They are generic over
//! [`ConnectionTrait`](sea_orm::ConnectionTrait) so the same repository runs on a
//! plain connection or inside a transaction.

pub mod package;
pub mod product;
pub mod reservation;
pub mod student;

pub use package::PackageRepository;
pub use product::ProductRepository;
pub use reservation::ReservationRepository;
pub use student::StudentRepository;
