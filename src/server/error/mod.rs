//! Error types for mealbox.
//!
//! Domain-specific errors (configuration, registration, inventory, integrity)
//! are aggregated into [`Error`] through `#[from]` conversions so services can
//! propagate them with `?`. Reservation rejections are not errors: they are
//! returned as [`ReservationRejection`](crate::model::reservation::ReservationRejection)
//! values.

pub mod config;
pub mod integrity;
pub mod package;
pub mod retry;
pub mod student;

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::server::error::{
    config::ConfigError, integrity::IntegrityError, package::PackageError, student::StudentError,
};

/// Main error type.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Validation errors of the registration and inventory flows
/// - Integrity faults (referenced rows vanished mid-operation)
/// - Concurrency conflicts (optimistic update lost twice)
/// - External library errors (database, scheduler)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Student registration was rejected.
    #[error(transparent)]
    StudentError(#[from] StudentError),
    /// Package or product inventory change was rejected.
    #[error(transparent)]
    PackageError(#[from] PackageError),
    /// A referenced student, package or reservation disappeared while being processed.
    #[error(transparent)]
    IntegrityError(#[from] IntegrityError),
    /// An optimistic concurrency check failed; the operation can be retried with fresh data.
    #[error("Concurrent update conflict on {0}")]
    ConcurrencyConflict(String),
    /// Internal error indicating a bug in mealbox.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] DbErr),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Returns true when `err` is a unique constraint violation.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Returns true when `err` is a foreign key constraint violation.
pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}
