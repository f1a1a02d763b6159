use std::collections::HashMap;

use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use crate::model::package::NewPackage;

pub struct PackageRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PackageRepository<'a, C> {
    /// Creates a new instance of [`PackageRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a package and links its products
    ///
    /// `is_adult_only` is passed in rather than derived here; the caller has already
    /// loaded the products to validate them.
    pub async fn create(
        &self,
        package: NewPackage,
        is_adult_only: bool,
        created_at: NaiveDateTime,
    ) -> Result<entity::package::Model, DbErr> {
        let product_ids = package.product_ids.clone();

        let package = entity::package::ActiveModel {
            name: ActiveValue::Set(package.name),
            cafeteria: ActiveValue::Set(package.cafeteria),
            city: ActiveValue::Set(package.city),
            meal_type: ActiveValue::Set(package.meal_type),
            price_cents: ActiveValue::Set(package.price_cents),
            pickup_at: ActiveValue::Set(package.pickup_at),
            last_reservation_at: ActiveValue::Set(package.last_reservation_at),
            is_adult_only: ActiveValue::Set(is_adult_only),
            created_at: ActiveValue::Set(created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.link_products(package.id, &product_ids).await?;

        Ok(package)
    }

    pub async fn get_by_id(&self, package_id: i32) -> Result<Option<entity::package::Model>, DbErr> {
        entity::prelude::Package::find_by_id(package_id)
            .one(self.db)
            .await
    }

    /// Locks a package row until the surrounding transaction ends
    ///
    /// Issues `SELECT ... FOR UPDATE`. A concurrent reservation insert waits on the
    /// lock through its foreign key. SQLite ignores the clause and serializes writers.
    pub async fn lock(&self, package_id: i32) -> Result<Option<entity::package::Model>, DbErr> {
        entity::prelude::Package::find_by_id(package_id)
            .lock_exclusive()
            .one(self.db)
            .await
    }

    /// Get a package together with its reservation, if it has one
    pub async fn get_with_reservation(
        &self,
        package_id: i32,
    ) -> Result<Option<(entity::package::Model, Option<entity::reservation::Model>)>, DbErr> {
        entity::prelude::Package::find_by_id(package_id)
            .find_also_related(entity::prelude::Reservation)
            .one(self.db)
            .await
    }

    /// Get packages without a reservation whose pickup time lies after `now`
    ///
    /// Ordered by pickup time ascending.
    pub async fn get_available(
        &self,
        now: NaiveDateTime,
    ) -> Result<Vec<entity::package::Model>, DbErr> {
        entity::prelude::Package::find()
            .join(
                sea_orm::JoinType::LeftJoin,
                entity::package::Relation::Reservation.def(),
            )
            .filter(entity::reservation::Column::Id.is_null())
            .filter(entity::package::Column::PickupAt.gt(now))
            .order_by_asc(entity::package::Column::PickupAt)
            .order_by_asc(entity::package::Column::Id)
            .all(self.db)
            .await
    }

    /// Get every package of a cafeteria with its reservation, ordered by pickup time
    pub async fn get_by_cafeteria(
        &self,
        cafeteria: &str,
    ) -> Result<Vec<(entity::package::Model, Option<entity::reservation::Model>)>, DbErr> {
        entity::prelude::Package::find()
            .filter(entity::package::Column::Cafeteria.eq(cafeteria))
            .find_also_related(entity::prelude::Reservation)
            .order_by_asc(entity::package::Column::PickupAt)
            .order_by_asc(entity::package::Column::Id)
            .all(self.db)
            .await
    }

    /// Get the linked products of each package
    ///
    /// # Returns
    /// - `Ok(HashMap)` - Products per package id; packages without products have no entry
    /// - `Err(DbErr)` - Database error
    pub async fn get_products(
        &self,
        package_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<entity::product::Model>>, DbErr> {
        let mut products: HashMap<i32, Vec<entity::product::Model>> = HashMap::new();
        if package_ids.is_empty() {
            return Ok(products);
        }

        let links = entity::prelude::PackageProduct::find()
            .filter(entity::package_product::Column::PackageId.is_in(package_ids.iter().copied()))
            .find_also_related(entity::prelude::Product)
            .order_by_asc(entity::product::Column::Name)
            .all(self.db)
            .await?;

        for (link, product) in links {
            if let Some(product) = product {
                products.entry(link.package_id).or_default().push(product);
            }
        }

        Ok(products)
    }

    /// Replaces the fields and product links of a package
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Updated package
    /// - `Ok(None)` - No package with `package_id`
    /// - `Err(DbErr)` - Database error
    pub async fn update(
        &self,
        package_id: i32,
        package: NewPackage,
        is_adult_only: bool,
    ) -> Result<Option<entity::package::Model>, DbErr> {
        let Some(existing) = self.get_by_id(package_id).await? else {
            return Ok(None);
        };

        let product_ids = package.product_ids.clone();

        let mut active = existing.into_active_model();
        active.name = ActiveValue::Set(package.name);
        active.cafeteria = ActiveValue::Set(package.cafeteria);
        active.city = ActiveValue::Set(package.city);
        active.meal_type = ActiveValue::Set(package.meal_type);
        active.price_cents = ActiveValue::Set(package.price_cents);
        active.pickup_at = ActiveValue::Set(package.pickup_at);
        active.last_reservation_at = ActiveValue::Set(package.last_reservation_at);
        active.is_adult_only = ActiveValue::Set(is_adult_only);
        let updated = active.update(self.db).await?;

        entity::prelude::PackageProduct::delete_many()
            .filter(entity::package_product::Column::PackageId.eq(package_id))
            .exec(self.db)
            .await?;
        self.link_products(package_id, &product_ids).await?;

        Ok(Some(updated))
    }

    /// Deletes a package and its product links
    ///
    /// # Returns
    /// - `Ok(true)` - Package deleted
    /// - `Ok(false)` - No package with `package_id`
    /// - `Err(DbErr)` - Database error
    pub async fn delete(&self, package_id: i32) -> Result<bool, DbErr> {
        entity::prelude::PackageProduct::delete_many()
            .filter(entity::package_product::Column::PackageId.eq(package_id))
            .exec(self.db)
            .await?;

        let result = entity::prelude::Package::delete_by_id(package_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn link_products(&self, package_id: i32, product_ids: &[i32]) -> Result<(), DbErr> {
        if product_ids.is_empty() {
            return Ok(());
        }

        let mut unique_ids = product_ids.to_vec();
        unique_ids.sort_unstable();
        unique_ids.dedup();

        let links = unique_ids
            .into_iter()
            .map(|product_id| entity::package_product::ActiveModel {
                package_id: ActiveValue::Set(package_id),
                product_id: ActiveValue::Set(product_id),
            });

        entity::prelude::PackageProduct::insert_many(links)
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }
}
