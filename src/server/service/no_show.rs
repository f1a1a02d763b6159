//! No-show tracking.
//!
//! A student's no-show counter and the no-show flag of a reservation always change
//! together inside one transaction. The counter write is guarded by the student's
//! row version; a lost race is retried once with fresh data before surfacing as
//! [`Error::ConcurrencyConflict`].

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::reservation::LifecycleOutcome,
    server::{
        data::{ReservationRepository, StudentRepository},
        error::{integrity::IntegrityError, Error},
        service::retry::RetryContext,
    },
};

/// Number of no-shows at which a student may no longer reserve packages.
pub const NO_SHOW_THRESHOLD: i32 = 2;

/// Returns true when a student with `no_show_count` no-shows may still reserve.
pub fn permits_reservation(no_show_count: i32) -> bool {
    no_show_count < NO_SHOW_THRESHOLD
}

pub struct NoShowService<'a> {
    db: &'a DatabaseConnection,
    retry: RetryContext,
}

impl<'a> NoShowService<'a> {
    const MAX_ATTEMPTS: u32 = 2;

    /// Creates a new instance of [`NoShowService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            retry: RetryContext::new().with_max_attempts(Self::MAX_ATTEMPTS),
        }
    }

    /// Get the no-show count of a student, 0 when the identity is unknown
    pub async fn get_no_show_count(&self, identity_id: &str) -> Result<i32, Error> {
        let student_repo = StudentRepository::new(self.db);

        let count = student_repo
            .get_by_identity(identity_id)
            .await?
            .map(|student| student.no_show_count.max(0))
            .unwrap_or(0);

        Ok(count)
    }

    /// Returns true when the student is below the no-show threshold
    ///
    /// Unknown identities have no no-shows and are therefore permitted.
    pub async fn can_reserve(&self, identity_id: &str) -> Result<bool, Error> {
        let count = self.get_no_show_count(identity_id).await?;

        Ok(permits_reservation(count))
    }

    /// Flags a reservation as no-show and increments its student's counter
    ///
    /// Repeated calls are no-ops returning [`LifecycleOutcome::Unchanged`].
    ///
    /// # Returns
    /// - `Ok(LifecycleOutcome::Applied)` - Flag set and counter incremented
    /// - `Ok(LifecycleOutcome::Unchanged)` - Reservation was already a no-show
    /// - `Err(Error::IntegrityError)` - Reservation or its student could not be found
    /// - `Err(Error::ConcurrencyConflict)` - The counter was changed concurrently twice in a row
    /// - `Err(Error::DbErr)` - Database error
    pub async fn process_no_show(&self, reservation_id: i32) -> Result<LifecycleOutcome, Error> {
        let description = format!("no-show for reservation ID {}", reservation_id);

        self.retry
            .execute_with_retry(&description, || self.set_no_show(reservation_id, true))
            .await
    }

    /// Clears the no-show flag of a reservation and decrements its student's counter
    ///
    /// The counter never drops below 0. Repeated calls are no-ops returning
    /// [`LifecycleOutcome::Unchanged`].
    ///
    /// # Returns
    /// - `Ok(LifecycleOutcome::Applied)` - Flag cleared and counter decremented
    /// - `Ok(LifecycleOutcome::Unchanged)` - Reservation was not a no-show
    /// - `Err(Error::IntegrityError)` - Reservation or its student could not be found
    /// - `Err(Error::ConcurrencyConflict)` - The counter was changed concurrently twice in a row
    /// - `Err(Error::DbErr)` - Database error
    pub async fn undo_no_show(&self, reservation_id: i32) -> Result<LifecycleOutcome, Error> {
        let description = format!("undo no-show for reservation ID {}", reservation_id);

        self.retry
            .execute_with_retry(&description, || self.set_no_show(reservation_id, false))
            .await
    }

    async fn set_no_show(
        &self,
        reservation_id: i32,
        is_no_show: bool,
    ) -> Result<LifecycleOutcome, Error> {
        let txn = self.db.begin().await?;

        let Some(change) = prepare_change(&txn, reservation_id, is_no_show).await? else {
            return Ok(LifecycleOutcome::Unchanged);
        };
        let student_number = change.student_number;
        let no_show_count = change.no_show_count;

        // Dropping the transaction on error rolls back the flag change
        apply_change(&txn, change).await?;

        txn.commit().await?;

        tracing::info!(
            "Reservation {} no-show set to {}, student {} now has {} no-show(s)",
            reservation_id,
            is_no_show,
            student_number,
            no_show_count
        );

        Ok(LifecycleOutcome::Applied)
    }
}

/// A pending flag change together with the counter value read for it.
struct NoShowChange {
    reservation: entity::reservation::Model,
    is_no_show: bool,
    student_number: i32,
    no_show_count: i32,
    expected_version: i32,
}

/// Reads the reservation and its student, `None` when the flag already has the requested value
async fn prepare_change<C: ConnectionTrait>(
    db: &C,
    reservation_id: i32,
    is_no_show: bool,
) -> Result<Option<NoShowChange>, Error> {
    let reservation = ReservationRepository::new(db)
        .get_by_id(reservation_id)
        .await?
        .ok_or(IntegrityError::ReservationNotFound(reservation_id))?;

    if reservation.is_no_show == is_no_show {
        return Ok(None);
    }

    let student_number = reservation.student_number;
    let student = StudentRepository::new(db)
        .get_by_number(student_number)
        .await?
        .ok_or(IntegrityError::StudentNotFound(student_number))?;

    let no_show_count = if is_no_show {
        student.no_show_count + 1
    } else {
        (student.no_show_count - 1).max(0)
    };

    Ok(Some(NoShowChange {
        reservation,
        is_no_show,
        student_number,
        no_show_count,
        expected_version: student.version,
    }))
}

/// Writes the flag, then the counter guarded by the version read in [`prepare_change`]
async fn apply_change<C: ConnectionTrait>(db: &C, change: NoShowChange) -> Result<(), Error> {
    ReservationRepository::new(db)
        .set_no_show(change.reservation, change.is_no_show)
        .await?;

    let written = StudentRepository::new(db)
        .update_no_show_count(
            change.student_number,
            change.no_show_count,
            change.expected_version,
        )
        .await?;
    if !written {
        return Err(Error::ConcurrencyConflict(format!(
            "no-show count of student {}",
            change.student_number
        )));
    }

    Ok(())
}
