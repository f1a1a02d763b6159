//! Reconciliation of reservations that were never collected.
//!
//! Run periodically by the scheduler. A reservation becomes a no-show once its
//! pickup time lies more than the grace period in the past and it was neither picked
//! up nor already marked as a no-show.

use chrono::Duration;
use sea_orm::DatabaseConnection;

use crate::{
    model::reservation::LifecycleOutcome,
    server::{
        data::ReservationRepository, error::Error, service::no_show::NoShowService,
        util::time::Clock,
    },
};

pub struct ReconcileService<'a> {
    db: &'a DatabaseConnection,
    clock: &'a dyn Clock,
    grace: Duration,
}

impl<'a> ReconcileService<'a> {
    /// Creates a new instance of [`ReconcileService`]
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `clock` - Source of the current time
    /// - `grace` - Time after pickup before an uncollected reservation counts as a no-show
    pub fn new(db: &'a DatabaseConnection, clock: &'a dyn Clock, grace: Duration) -> Self {
        Self { db, clock, grace }
    }

    /// Records a no-show for every expired, unresolved reservation
    ///
    /// A failure on one reservation is logged and the sweep moves on to the next.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of reservations marked as no-show
    /// - `Err(Error::InternalError)` - The grace period does not fit before the current time
    /// - `Err(Error::DbErr)` - Expired reservations could not be loaded
    pub async fn reconcile_expired_reservations(&self) -> Result<usize, Error> {
        let now = self.clock.now();
        let cutoff = now.checked_sub_signed(self.grace).ok_or_else(|| {
            Error::InternalError(format!(
                "grace period of {} minutes before {} is out of range",
                self.grace.num_minutes(),
                now
            ))
        })?;

        let expired = ReservationRepository::new(self.db)
            .get_expired_pending(cutoff)
            .await?;

        let no_show_service = NoShowService::new(self.db);

        let mut processed = 0;
        for reservation in expired {
            match no_show_service.process_no_show(reservation.id).await {
                Ok(LifecycleOutcome::Applied) => processed += 1,
                Ok(_) => {}
                Err(e) => tracing::error!(
                    "Failed to record no-show for reservation {}: {}",
                    reservation.id,
                    e
                ),
            }
        }

        if processed > 0 {
            tracing::info!("Recorded {} no-show(s) before {}", processed, cutoff);
        }

        Ok(processed)
    }
}
