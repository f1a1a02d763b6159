//! Reservation lifecycle: reserving a package and recording its pickup or no-show.
//!
//! Eligibility checks run in a fixed order and the first failing check decides the
//! [`ReservationRejection`]. Two requests for the same package can both pass every
//! check; the unique index on `reservation.package_id` then lets exactly one insert
//! succeed and the other is reported as [`ReservationRejection::AlreadyReserved`].

#[cfg(test)]
mod tests;

use sea_orm::DatabaseConnection;

use crate::{
    model::reservation::{
        LifecycleOutcome, ReservationRejection, ReservationStatus, ReservationView,
        ReserveOutcome,
    },
    server::{
        data::{PackageRepository, ReservationRepository, StudentRepository},
        error::{integrity::IntegrityError, is_foreign_key_violation, is_unique_violation, Error},
        service::{eligibility, no_show::{self, NoShowService}},
        util::time::Clock,
    },
};

pub struct ReservationService<'a> {
    db: &'a DatabaseConnection,
    clock: &'a dyn Clock,
}

impl<'a> ReservationService<'a> {
    /// Creates a new instance of [`ReservationService`]
    pub fn new(db: &'a DatabaseConnection, clock: &'a dyn Clock) -> Self {
        Self { db, clock }
    }

    /// Reserves a package for the student linked to `identity_id`
    ///
    /// Checks, first failure wins:
    /// 1. the identity resolves to a student
    /// 2. the package exists
    /// 3. the package is not reserved yet
    /// 4. the pickup time has not passed
    /// 5. the reservation deadline has not passed
    /// 6. the student is below the no-show threshold
    /// 7. the student is old enough on the pickup date
    /// 8. the student has no other reservation on the pickup date
    ///
    /// # Arguments
    /// - `package_id` - ID of the package to reserve
    /// - `identity_id` - External identity of the requesting student
    ///
    /// # Returns
    /// - `Ok(ReserveOutcome::Reserved)` - Reservation stored
    /// - `Ok(ReserveOutcome::Rejected)` - A check failed, nothing was stored
    /// - `Err(Error::IntegrityError)` - Package or student vanished while storing the reservation
    /// - `Err(Error::DbErr)` - Database error
    pub async fn reserve(
        &self,
        package_id: i32,
        identity_id: &str,
    ) -> Result<ReserveOutcome, Error> {
        let student_repo = StudentRepository::new(self.db);
        let package_repo = PackageRepository::new(self.db);
        let reservation_repo = ReservationRepository::new(self.db);

        let now = self.clock.now();

        let Some(student) = student_repo.get_by_identity(identity_id).await? else {
            return Ok(reject(package_id, ReservationRejection::StudentNotFound));
        };

        let Some((package, existing)) = package_repo.get_with_reservation(package_id).await?
        else {
            return Ok(reject(package_id, ReservationRejection::PackageNotFound));
        };

        let pickup_date = package.pickup_at.date();

        let rejection = if existing.is_some() {
            Some(ReservationRejection::AlreadyReserved)
        } else if now >= package.pickup_at {
            Some(ReservationRejection::PickupTimePassed)
        } else if now >= package.last_reservation_at {
            Some(ReservationRejection::ReservationWindowClosed)
        } else if !no_show::permits_reservation(student.no_show_count) {
            Some(ReservationRejection::TooManyNoShows)
        } else if !eligibility::is_eligible(&student, &package, pickup_date) {
            Some(ReservationRejection::AgeRestricted)
        } else if reservation_repo
            .has_reservation_for_date(student.student_number, pickup_date)
            .await?
        {
            Some(ReservationRejection::DuplicateDateReservation)
        } else {
            None
        };

        if let Some(rejection) = rejection {
            return Ok(reject(package_id, rejection));
        }

        match reservation_repo
            .create(package.id, student.student_number, now)
            .await
        {
            Ok(reservation) => {
                tracing::info!(
                    "Student {} reserved package {} (reservation {})",
                    student.student_number,
                    package.id,
                    reservation.id
                );

                Ok(ReserveOutcome::Reserved(reservation.into()))
            }
            // Another request reserved the package after our checks passed
            Err(e) if is_unique_violation(&e) => {
                Ok(reject(package_id, ReservationRejection::AlreadyReserved))
            }
            Err(e) if is_foreign_key_violation(&e) => {
                let err = IntegrityError::ReservationTargetVanished {
                    package_id: package.id,
                    student_number: student.student_number,
                };
                tracing::error!("{}", err);

                Err(err.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Marks the reservation of a package as picked up
    ///
    /// A prior no-show flag is left as is.
    ///
    /// # Returns
    /// - `Ok(LifecycleOutcome::Applied)` - Reservation marked as picked up
    /// - `Ok(LifecycleOutcome::Unchanged)` - Reservation was already picked up
    /// - `Ok(LifecycleOutcome::NoReservation)` - Package has no reservation
    /// - `Err(Error::DbErr)` - Database error
    pub async fn mark_picked_up(&self, package_id: i32) -> Result<LifecycleOutcome, Error> {
        let reservation_repo = ReservationRepository::new(self.db);

        let Some(reservation) = reservation_repo.get_by_package_id(package_id).await? else {
            tracing::debug!("No reservation to mark as picked up for package {}", package_id);
            return Ok(LifecycleOutcome::NoReservation);
        };

        if reservation.is_picked_up {
            return Ok(LifecycleOutcome::Unchanged);
        }

        let reservation = reservation_repo.set_picked_up(reservation).await?;

        tracing::info!(
            "Reservation {} for package {} picked up",
            reservation.id,
            package_id
        );

        Ok(LifecycleOutcome::Applied)
    }

    /// Records a no-show for the reservation of a package
    ///
    /// See [`NoShowService::process_no_show`].
    pub async fn mark_no_show(&self, package_id: i32) -> Result<LifecycleOutcome, Error> {
        let reservation_repo = ReservationRepository::new(self.db);

        let Some(reservation) = reservation_repo.get_by_package_id(package_id).await? else {
            tracing::debug!("No reservation to mark as no-show for package {}", package_id);
            return Ok(LifecycleOutcome::NoReservation);
        };

        NoShowService::new(self.db)
            .process_no_show(reservation.id)
            .await
    }

    /// Reverts a no-show for the reservation of a package
    ///
    /// See [`NoShowService::undo_no_show`].
    pub async fn undo_no_show(&self, package_id: i32) -> Result<LifecycleOutcome, Error> {
        let reservation_repo = ReservationRepository::new(self.db);

        let Some(reservation) = reservation_repo.get_by_package_id(package_id).await? else {
            tracing::debug!("No reservation to undo no-show for package {}", package_id);
            return Ok(LifecycleOutcome::NoReservation);
        };

        NoShowService::new(self.db).undo_no_show(reservation.id).await
    }

    /// Get the reservations of the student linked to `identity_id`, ordered by pickup time
    ///
    /// Returns an empty list for an unknown identity.
    pub async fn get_student_reservations(
        &self,
        identity_id: &str,
    ) -> Result<Vec<ReservationView>, Error> {
        let student_repo = StudentRepository::new(self.db);
        let reservation_repo = ReservationRepository::new(self.db);

        let Some(student) = student_repo.get_by_identity(identity_id).await? else {
            return Ok(Vec::new());
        };

        let reservations = reservation_repo
            .get_by_student_with_package(student.student_number)
            .await?;

        let mut views = Vec::with_capacity(reservations.len());
        for (reservation, package) in reservations {
            let package = package.ok_or_else(|| {
                Error::InternalError(format!(
                    "Reservation {} has no package despite the foreign key",
                    reservation.id
                ))
            })?;

            views.push(ReservationView {
                reservation_id: reservation.id,
                package_id: package.id,
                package_name: package.name,
                cafeteria: package.cafeteria,
                city: package.city,
                pickup_at: package.pickup_at,
                reserved_at: reservation.reserved_at,
                status: ReservationStatus::from_flags(
                    reservation.is_picked_up,
                    reservation.is_no_show,
                ),
            });
        }

        Ok(views)
    }
}

fn reject(package_id: i32, rejection: ReservationRejection) -> ReserveOutcome {
    tracing::debug!("Reservation of package {} rejected: {}", package_id, rejection);

    ReserveOutcome::Rejected(rejection)
}
