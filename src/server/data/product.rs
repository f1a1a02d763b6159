use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct ProductRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProductRepository<'a, C> {
    /// Creates a new instance of [`ProductRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        name: String,
        contains_alcohol: bool,
    ) -> Result<entity::product::Model, DbErr> {
        let product = entity::product::ActiveModel {
            name: ActiveValue::Set(name),
            contains_alcohol: ActiveValue::Set(contains_alcohol),
            ..Default::default()
        };

        product.insert(self.db).await
    }

    /// Get the products matching any of `product_ids`
    ///
    /// Unknown ids are silently absent from the result.
    pub async fn get_many(
        &self,
        product_ids: &[i32],
    ) -> Result<Vec<entity::product::Model>, DbErr> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Product::find()
            .filter(entity::product::Column::Id.is_in(product_ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Get the whole catalog ordered by name
    pub async fn get_all(&self) -> Result<Vec<entity::product::Model>, DbErr> {
        entity::prelude::Product::find()
            .order_by_asc(entity::product::Column::Name)
            .all(self.db)
            .await
    }
}
