//! Package availability for students.
//!
//! Reads only. Packages that are reserved or whose pickup time has passed never
//! show up; the rest are annotated with whether the requesting student may reserve
//! them.

use std::collections::HashSet;

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::{
    model::package::{AnnotatedPackage, BlockReason, PackageDto, PackageFilter},
    server::{
        data::{PackageRepository, ReservationRepository, StudentRepository},
        error::Error,
        service::{eligibility, no_show},
        util::time::Clock,
    },
};

pub struct AvailabilityService<'a> {
    db: &'a DatabaseConnection,
    clock: &'a dyn Clock,
}

impl<'a> AvailabilityService<'a> {
    /// Creates a new instance of [`AvailabilityService`]
    pub fn new(db: &'a DatabaseConnection, clock: &'a dyn Clock) -> Self {
        Self { db, clock }
    }

    /// Get the unreserved, upcoming packages matching `filter`, annotated for the student
    ///
    /// # Arguments
    /// - `identity_id` - External identity of the requesting student
    /// - `filter` - Optional city, meal type and maximum price predicates
    ///
    /// # Returns
    /// - `Ok(Vec<AnnotatedPackage>)` - Packages ordered by pickup time; empty for an unknown identity
    /// - `Err(Error::DbErr)` - Database error
    pub async fn get_available_packages(
        &self,
        identity_id: &str,
        filter: &PackageFilter,
    ) -> Result<Vec<AnnotatedPackage>, Error> {
        let student_repo = StudentRepository::new(self.db);
        let package_repo = PackageRepository::new(self.db);
        let reservation_repo = ReservationRepository::new(self.db);

        let Some(student) = student_repo.get_by_identity(identity_id).await? else {
            tracing::debug!("No student for identity {}, no packages listed", identity_id);
            return Ok(Vec::new());
        };

        let now = self.clock.now();

        let packages: Vec<entity::package::Model> = package_repo
            .get_available(now)
            .await?
            .into_iter()
            .filter(|package| filter.matches(package))
            .collect();

        let reserved_dates: HashSet<NaiveDate> = reservation_repo
            .get_reserved_dates(student.student_number)
            .await?
            .into_iter()
            .collect();

        let package_ids: Vec<i32> = packages.iter().map(|p| p.id).collect();
        let mut products = package_repo.get_products(&package_ids).await?;

        let annotated = packages
            .into_iter()
            .map(|package| {
                let block_reason = block_reason(&student, &package, &reserved_dates, now.date());
                let product_names = products
                    .remove(&package.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|product| product.name)
                    .collect();

                AnnotatedPackage {
                    package: PackageDto::from_model(package, product_names, false),
                    can_reserve: block_reason.is_none(),
                    block_reason,
                }
            })
            .collect();

        Ok(annotated)
    }
}

/// First reason, in fixed priority order, that keeps the student from reserving `package`
///
/// Age is evaluated on `today`, unlike the reservation itself which uses the pickup date.
///
/// # Arguments
/// - `student` - Requesting student
/// - `package` - Package to evaluate
/// - `reserved_dates` - Pickup dates the student already holds a reservation for
/// - `today` - Current date
pub fn block_reason(
    student: &entity::student::Model,
    package: &entity::package::Model,
    reserved_dates: &HashSet<NaiveDate>,
    today: NaiveDate,
) -> Option<BlockReason> {
    if reserved_dates.contains(&package.pickup_at.date()) {
        return Some(BlockReason::DuplicateDate);
    }

    if !no_show::permits_reservation(student.no_show_count) {
        return Some(BlockReason::TooManyNoShows);
    }

    if !eligibility::is_eligible(student, package, today) {
        return Some(BlockReason::AgeRestricted);
    }

    None
}
