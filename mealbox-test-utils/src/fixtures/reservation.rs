use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::test_now, error::TestError, model::ReservationModel, TestContext};

impl TestContext {
    pub fn reservation(&self) -> ReservationFixtures<'_> {
        ReservationFixtures { setup: self }
    }
}

pub struct ReservationFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> ReservationFixtures<'a> {
    /// Insert a pending reservation.
    pub async fn insert_reservation(
        &self,
        package_id: i32,
        student_number: i32,
    ) -> Result<ReservationModel, TestError> {
        self.insert_reservation_with_flags(package_id, student_number, false, false)
            .await
    }

    /// Insert a reservation with explicit pickup/no-show flags.
    pub async fn insert_reservation_with_flags(
        &self,
        package_id: i32,
        student_number: i32,
        is_picked_up: bool,
        is_no_show: bool,
    ) -> Result<ReservationModel, TestError> {
        Ok(
            entity::prelude::Reservation::insert(entity::reservation::ActiveModel {
                package_id: ActiveValue::Set(package_id),
                student_number: ActiveValue::Set(student_number),
                reserved_at: ActiveValue::Set(test_now()),
                is_picked_up: ActiveValue::Set(is_picked_up),
                is_no_show: ActiveValue::Set(is_no_show),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Read a reservation back from the database.
    pub async fn get(&self, reservation_id: i32) -> Result<Option<ReservationModel>, TestError> {
        Ok(entity::prelude::Reservation::find_by_id(reservation_id)
            .one(&self.setup.db)
            .await?)
    }

    /// Count all reservations in the database.
    pub async fn count(&self) -> Result<usize, TestError> {
        Ok(entity::prelude::Reservation::find()
            .all(&self.setup.db)
            .await?
            .len())
    }
}
