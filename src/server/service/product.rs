use sea_orm::DatabaseConnection;

use crate::{
    model::package::ProductDto,
    server::{
        data::ProductRepository,
        error::{package::PackageError, Error},
    },
};

pub struct ProductService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProductService<'a> {
    /// Creates a new instance of [`ProductService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a product to the catalog
    ///
    /// # Returns
    /// - `Ok(ProductDto)` - Created product
    /// - `Err(Error::PackageError)` - The name is blank
    /// - `Err(Error::DbErr)` - Database error
    pub async fn create_product(
        &self,
        name: &str,
        contains_alcohol: bool,
    ) -> Result<ProductDto, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PackageError::BlankProductName.into());
        }

        let product = ProductRepository::new(self.db)
            .create(name.to_string(), contains_alcohol)
            .await?;

        tracing::info!("Added product {} ({})", product.id, product.name);

        Ok(product.into())
    }

    /// Get the whole catalog ordered by name
    pub async fn list_products(&self) -> Result<Vec<ProductDto>, Error> {
        let products = ProductRepository::new(self.db).get_all().await?;

        Ok(products.into_iter().map(ProductDto::from).collect())
    }
}
