use chrono::Duration;
use sea_orm::DatabaseConnection;

use crate::server::{
    error::Error,
    service::reconcile::ReconcileService,
    util::time::SystemClock,
};

/// Runs one no-show reconciliation sweep against the system clock
///
/// # Arguments
/// - `db` - Database connection
/// - `grace` - Time after pickup before an uncollected reservation counts as a no-show
///
/// # Returns
/// - `Ok(usize)` - Number of reservations marked as no-show
/// - `Err(Error)` - Expired reservations could not be loaded
pub async fn reconcile_expired_reservations(
    db: DatabaseConnection,
    grace: Duration,
) -> Result<usize, Error> {
    let clock = SystemClock;
    let reconcile_service = ReconcileService::new(&db, &clock, grace);

    reconcile_service.reconcile_expired_reservations().await
}
