//! Reservation engine for surplus meal packages from campus cafeterias.
//!
//! Students reserve packages that cafeterias have left over at the end of the
//! day; cafeteria employees manage the package inventory. The [`server`] module
//! holds persistence, the reservation eligibility and lifecycle services, and
//! the scheduled reconciliation of missed pickups. [`model`] holds the
//! serializable types exchanged with callers.

pub mod model;
pub mod server;
