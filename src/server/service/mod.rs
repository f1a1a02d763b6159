//! Service layer for business logic.
//!
//! Services validate input, coordinate repositories and own the transaction
//! boundaries of multi-step writes. Rules that depend on the current time read it
//! from an injected [`Clock`](crate::server::util::time::Clock).

pub mod availability;
pub mod eligibility;
pub mod no_show;
pub mod package;
pub mod product;
pub mod reconcile;
pub mod reservation;
pub mod retry;
pub mod student;
