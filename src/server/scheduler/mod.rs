//! Scheduler for periodic maintenance jobs.
//!
//! Runs the no-show reconciliation sweep on a cron schedule. Read paths never
//! reconcile; stale reservations are only resolved here.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{config::Config, error::Error};

pub mod config;
pub mod reconcile;


use self::reconcile::reconcile_expired_reservations;

/// Job scheduler for managing background jobs.
pub struct Scheduler {
    db: DatabaseConnection,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Arguments
    /// - `db` - Database connection handed to every job
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(db: DatabaseConnection) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { db, sched })
    }

    /// Registers all scheduled jobs and starts the scheduler.
    ///
    /// The following jobs are registered:
    /// - No-show reconciliation, on `config.reconcile_cron`
    ///
    /// # Returns
    /// - `Ok(JobScheduler)` - Running scheduler, call `shutdown` on it to stop
    /// - `Err(Error)` - Failed to register a job or start the scheduler
    pub async fn start(mut self, config: &Config) -> Result<JobScheduler, Error> {
        let grace = config.no_show_grace;

        self.schedule_job(&config.reconcile_cron, "no-show reconciliation", move |db| {
            reconcile_expired_reservations(db, grace)
        })
        .await?;

        self.sched.start().await?;

        tracing::info!(
            "Scheduler started, reconciling no-shows on \"{}\"",
            config.reconcile_cron
        );

        Ok(self.sched)
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// On execution, the job logs the number of processed items (on success) or the
    /// error that stopped it.
    ///
    /// # Arguments
    /// - `cron` - Cron expression with seconds (e.g., "0 */15 * * * *" for every 15 minutes)
    /// - `name` - Human-readable name for the job (used in log messages)
    /// - `function` - Async job receiving a clone of the database connection, returning the count of processed items
    ///
    /// # Returns
    /// - `Ok(())` - Job successfully registered with the scheduler
    /// - `Err(Error)` - Failed to create or add the job (invalid cron expression or scheduler error)
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(DatabaseConnection) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<usize, Error>> + Send + 'static,
    {
        let db = self.db.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let db = db.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(db).await {
                        Ok(count) => tracing::debug!("Processed {} item(s) in {}", count, name),
                        Err(e) => tracing::error!("Error running {}: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}
