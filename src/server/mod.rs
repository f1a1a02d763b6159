//! Server-side modules.
//!
//! Persistence (`data`), business rules (`service`), the reconciliation
//! scheduler, configuration, and error handling.

#![warn(missing_docs)]

pub mod config;
pub mod data;
pub mod error;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
