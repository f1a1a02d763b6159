use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn product(&self) -> ProductFixtures<'_> {
        ProductFixtures { setup: self }
    }
}

pub struct ProductFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> ProductFixtures<'a> {
    pub async fn insert_product(
        &self,
        name: &str,
        contains_alcohol: bool,
    ) -> Result<entity::product::Model, TestError> {
        Ok(
            entity::prelude::Product::insert(entity::product::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                contains_alcohol: ActiveValue::Set(contains_alcohol),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
