use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use crate::server::util::time::day_bounds;

pub struct ReservationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReservationRepository<'a, C> {
    /// Creates a new instance of [`ReservationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a pending reservation
    ///
    /// The unique index on `package_id` rejects a second reservation for the same
    /// package with a unique constraint violation.
    pub async fn create(
        &self,
        package_id: i32,
        student_number: i32,
        reserved_at: NaiveDateTime,
    ) -> Result<entity::reservation::Model, DbErr> {
        let reservation = entity::reservation::ActiveModel {
            package_id: ActiveValue::Set(package_id),
            student_number: ActiveValue::Set(student_number),
            reserved_at: ActiveValue::Set(reserved_at),
            is_picked_up: ActiveValue::Set(false),
            is_no_show: ActiveValue::Set(false),
            ..Default::default()
        };

        reservation.insert(self.db).await
    }

    pub async fn get_by_id(
        &self,
        reservation_id: i32,
    ) -> Result<Option<entity::reservation::Model>, DbErr> {
        entity::prelude::Reservation::find_by_id(reservation_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_package_id(
        &self,
        package_id: i32,
    ) -> Result<Option<entity::reservation::Model>, DbErr> {
        entity::prelude::Reservation::find()
            .filter(entity::reservation::Column::PackageId.eq(package_id))
            .one(self.db)
            .await
    }

    /// Get every reservation of a student with its package, ordered by pickup time
    pub async fn get_by_student_with_package(
        &self,
        student_number: i32,
    ) -> Result<Vec<(entity::reservation::Model, Option<entity::package::Model>)>, DbErr> {
        entity::prelude::Reservation::find()
            .filter(entity::reservation::Column::StudentNumber.eq(student_number))
            .find_also_related(entity::prelude::Package)
            .order_by_asc(entity::package::Column::PickupAt)
            .order_by_asc(entity::reservation::Column::Id)
            .all(self.db)
            .await
    }

    /// Returns true when the student holds any reservation for a package picked up on `date`
    pub async fn has_reservation_for_date(
        &self,
        student_number: i32,
        date: NaiveDate,
    ) -> Result<bool, DbErr> {
        let (start, end) = day_bounds(date);

        let count = entity::prelude::Reservation::find()
            .join(
                sea_orm::JoinType::InnerJoin,
                entity::reservation::Relation::Package.def(),
            )
            .filter(entity::reservation::Column::StudentNumber.eq(student_number))
            .filter(entity::package::Column::PickupAt.gte(start))
            .filter(entity::package::Column::PickupAt.lt(end))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Pickup dates of every package the student has reserved
    pub async fn get_reserved_dates(&self, student_number: i32) -> Result<Vec<NaiveDate>, DbErr> {
        let pickups: Vec<NaiveDateTime> = entity::prelude::Reservation::find()
            .select_only()
            .column(entity::package::Column::PickupAt)
            .join(
                sea_orm::JoinType::InnerJoin,
                entity::reservation::Relation::Package.def(),
            )
            .filter(entity::reservation::Column::StudentNumber.eq(student_number))
            .into_tuple()
            .all(self.db)
            .await?;

        let mut dates: Vec<NaiveDate> = pickups.into_iter().map(|p| p.date()).collect();
        dates.sort_unstable();
        dates.dedup();

        Ok(dates)
    }

    pub async fn set_picked_up(
        &self,
        reservation: entity::reservation::Model,
    ) -> Result<entity::reservation::Model, DbErr> {
        let mut reservation = reservation.into_active_model();
        reservation.is_picked_up = ActiveValue::Set(true);

        reservation.update(self.db).await
    }

    pub async fn set_no_show(
        &self,
        reservation: entity::reservation::Model,
        is_no_show: bool,
    ) -> Result<entity::reservation::Model, DbErr> {
        let mut reservation = reservation.into_active_model();
        reservation.is_no_show = ActiveValue::Set(is_no_show);

        reservation.update(self.db).await
    }

    /// Get reservations neither picked up nor marked as no-show whose pickup time is at or before `cutoff`
    pub async fn get_expired_pending(
        &self,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<entity::reservation::Model>, DbErr> {
        entity::prelude::Reservation::find()
            .join(
                sea_orm::JoinType::InnerJoin,
                entity::reservation::Relation::Package.def(),
            )
            .filter(entity::reservation::Column::IsPickedUp.eq(false))
            .filter(entity::reservation::Column::IsNoShow.eq(false))
            .filter(entity::package::Column::PickupAt.lte(cutoff))
            .order_by_asc(entity::package::Column::PickupAt)
            .order_by_asc(entity::reservation::Column::Id)
            .all(self.db)
            .await
    }
}
