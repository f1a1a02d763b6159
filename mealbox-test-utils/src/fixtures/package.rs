use chrono::NaiveDateTime;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, fixtures::factory, model::PackageModel, TestContext};

impl TestContext {
    pub fn package(&self) -> PackageFixtures<'_> {
        PackageFixtures { setup: self }
    }
}

pub struct PackageFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> PackageFixtures<'a> {
    /// Insert a package from a model, ignoring its `id`.
    ///
    /// Build the model with the factory functions and override fields as needed:
    ///
    /// ```ignore
    /// let package = test
    ///     .package()
    ///     .insert(PackageModel {
    ///         city: "Tilburg".to_string(),
    ///         ..factory::mock_package_model(pickup, deadline)
    ///     })
    ///     .await?;
    /// ```
    pub async fn insert(&self, package: PackageModel) -> Result<PackageModel, TestError> {
        Ok(
            entity::prelude::Package::insert(entity::package::ActiveModel {
                name: ActiveValue::Set(package.name),
                cafeteria: ActiveValue::Set(package.cafeteria),
                city: ActiveValue::Set(package.city),
                meal_type: ActiveValue::Set(package.meal_type),
                price_cents: ActiveValue::Set(package.price_cents),
                pickup_at: ActiveValue::Set(package.pickup_at),
                last_reservation_at: ActiveValue::Set(package.last_reservation_at),
                is_adult_only: ActiveValue::Set(package.is_adult_only),
                created_at: ActiveValue::Set(package.created_at),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a regular package with the given schedule.
    pub async fn insert_mock_package(
        &self,
        pickup_at: NaiveDateTime,
        last_reservation_at: NaiveDateTime,
    ) -> Result<PackageModel, TestError> {
        self.insert(factory::mock_package_model(pickup_at, last_reservation_at))
            .await
    }

    /// Insert an adult-only package with the given schedule.
    pub async fn insert_mock_adult_package(
        &self,
        pickup_at: NaiveDateTime,
        last_reservation_at: NaiveDateTime,
    ) -> Result<PackageModel, TestError> {
        self.insert(factory::mock_adult_package_model(
            pickup_at,
            last_reservation_at,
        ))
        .await
    }

    /// Link an existing product to an existing package.
    pub async fn link_product(&self, package_id: i32, product_id: i32) -> Result<(), TestError> {
        entity::prelude::PackageProduct::insert(entity::package_product::ActiveModel {
            package_id: ActiveValue::Set(package_id),
            product_id: ActiveValue::Set(product_id),
        })
        .exec_without_returning(&self.setup.db)
        .await?;

        Ok(())
    }
}
