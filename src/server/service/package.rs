//! Package inventory for cafeteria employees.
//!
//! A package is adult-only exactly when one of its products contains alcohol; the
//! flag is derived on every create and update. Once a package is reserved it can no
//! longer be changed or deleted.

use chrono::NaiveDateTime;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::package::{NewPackage, PackageDto},
    server::{
        data::{PackageRepository, ProductRepository},
        error::{package::PackageError, Error},
        util::time::Clock,
    },
};

pub struct PackageService<'a> {
    db: &'a DatabaseConnection,
    clock: &'a dyn Clock,
}

impl<'a> PackageService<'a> {
    /// Creates a new instance of [`PackageService`]
    pub fn new(db: &'a DatabaseConnection, clock: &'a dyn Clock) -> Self {
        Self { db, clock }
    }

    /// Creates a package with its products
    ///
    /// # Returns
    /// - `Ok(PackageDto)` - Created package
    /// - `Err(Error::PackageError)` - Validation failed or a product ID is unknown
    /// - `Err(Error::DbErr)` - Database error
    pub async fn create_package(&self, package: NewPackage) -> Result<PackageDto, Error> {
        let now = self.clock.now();
        let package = normalize(package);
        validate(&package, now)?;

        let txn = self.db.begin().await?;

        let (is_adult_only, product_names) = resolve_products(&txn, &package.product_ids).await?;
        let created = PackageRepository::new(&txn)
            .create(package, is_adult_only, now)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Created package {} for cafeteria {}",
            created.id,
            created.cafeteria
        );

        Ok(PackageDto::from_model(created, product_names, false))
    }

    /// Replaces the fields and products of an unreserved package
    ///
    /// # Returns
    /// - `Ok(PackageDto)` - Updated package
    /// - `Err(Error::PackageError)` - Package missing or reserved, validation failed, or a product ID is unknown
    /// - `Err(Error::DbErr)` - Database error
    pub async fn update_package(
        &self,
        package_id: i32,
        package: NewPackage,
    ) -> Result<PackageDto, Error> {
        let now = self.clock.now();
        let package = normalize(package);

        let txn = self.db.begin().await?;
        let package_repo = PackageRepository::new(&txn);

        ensure_unreserved(&package_repo, package_id).await?;
        validate(&package, now)?;

        let (is_adult_only, product_names) = resolve_products(&txn, &package.product_ids).await?;
        let updated = package_repo
            .update(package_id, package, is_adult_only)
            .await?
            .ok_or(PackageError::NotFound(package_id))?;

        txn.commit().await?;

        tracing::info!("Updated package {}", package_id);

        Ok(PackageDto::from_model(updated, product_names, false))
    }

    /// Deletes an unreserved package
    ///
    /// # Returns
    /// - `Ok(())` - Package deleted
    /// - `Err(Error::PackageError)` - Package missing or reserved
    /// - `Err(Error::DbErr)` - Database error
    pub async fn delete_package(&self, package_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;
        let package_repo = PackageRepository::new(&txn);

        ensure_unreserved(&package_repo, package_id).await?;
        if !package_repo.delete(package_id).await? {
            return Err(PackageError::NotFound(package_id).into());
        }

        txn.commit().await?;

        tracing::info!("Deleted package {}", package_id);

        Ok(())
    }

    /// Get a package with its product names
    pub async fn get_package(&self, package_id: i32) -> Result<Option<PackageDto>, Error> {
        let package_repo = PackageRepository::new(self.db);

        let Some((package, reservation)) = package_repo.get_with_reservation(package_id).await?
        else {
            return Ok(None);
        };

        let mut products = package_repo.get_products(&[package.id]).await?;
        let product_names = product_names(products.remove(&package.id).unwrap_or_default());

        Ok(Some(PackageDto::from_model(
            package,
            product_names,
            reservation.is_some(),
        )))
    }

    /// Get every package of a cafeteria, reserved ones included, ordered by pickup time
    pub async fn get_packages_by_cafeteria(
        &self,
        cafeteria: &str,
    ) -> Result<Vec<PackageDto>, Error> {
        let package_repo = PackageRepository::new(self.db);

        let packages = package_repo.get_by_cafeteria(cafeteria).await?;

        let package_ids: Vec<i32> = packages.iter().map(|(p, _)| p.id).collect();
        let mut products = package_repo.get_products(&package_ids).await?;

        Ok(packages
            .into_iter()
            .map(|(package, reservation)| {
                let names = product_names(products.remove(&package.id).unwrap_or_default());
                PackageDto::from_model(package, names, reservation.is_some())
            })
            .collect())
    }
}

fn normalize(mut package: NewPackage) -> NewPackage {
    package.name = package.name.trim().to_string();
    package.product_ids.sort_unstable();
    package.product_ids.dedup();
    package
}

fn validate(package: &NewPackage, now: NaiveDateTime) -> Result<(), PackageError> {
    if package.name.is_empty() {
        return Err(PackageError::BlankName);
    }
    if package.product_ids.is_empty() {
        return Err(PackageError::NoProducts);
    }
    if package.price_cents < 0 {
        return Err(PackageError::NegativePrice);
    }
    if package.last_reservation_at >= package.pickup_at {
        return Err(PackageError::DeadlineNotBeforePickup);
    }
    if package.pickup_at <= now {
        return Err(PackageError::PickupNotInFuture);
    }

    Ok(())
}

/// Locks the package row, then checks it has no reservation
async fn ensure_unreserved<C: ConnectionTrait>(
    package_repo: &PackageRepository<'_, C>,
    package_id: i32,
) -> Result<(), Error> {
    if package_repo.lock(package_id).await?.is_none() {
        return Err(PackageError::NotFound(package_id).into());
    }

    match package_repo.get_with_reservation(package_id).await? {
        None => Err(PackageError::NotFound(package_id).into()),
        Some((_, Some(_))) => Err(PackageError::AlreadyReserved(package_id).into()),
        Some((_, None)) => Ok(()),
    }
}

/// Loads the products, returning whether any contains alcohol and their names
async fn resolve_products<C: ConnectionTrait>(
    db: &C,
    product_ids: &[i32],
) -> Result<(bool, Vec<String>), Error> {
    let products = ProductRepository::new(db).get_many(product_ids).await?;

    let unknown: Vec<i32> = product_ids
        .iter()
        .copied()
        .filter(|id| !products.iter().any(|p| p.id == *id))
        .collect();
    if !unknown.is_empty() {
        return Err(PackageError::UnknownProducts(unknown).into());
    }

    let is_adult_only = products.iter().any(|p| p.contains_alcohol);

    let mut names = product_names(products);
    names.sort();

    Ok((is_adult_only, names))
}

fn product_names(products: Vec<entity::product::Model>) -> Vec<String> {
    products.into_iter().map(|product| product.name).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use entity::package::MealType;
    use mealbox_test_utils::prelude::*;

    use crate::model::package::NewPackage;

    fn new_package(product_ids: Vec<i32>) -> NewPackage {
        NewPackage {
            name: "Evening box".to_string(),
            cafeteria: TEST_CAFETERIA.to_string(),
            city: TEST_CITY.to_string(),
            meal_type: MealType::WarmMeal,
            price_cents: 500,
            pickup_at: test_now() + Duration::hours(6),
            last_reservation_at: test_now() + Duration::hours(4),
            product_ids,
        }
    }

    mod create_package {
        use chrono::Duration;
        use mealbox_test_utils::prelude::*;

        use super::new_package;
        use crate::{
            model::package::NewPackage,
            server::{
                error::{package::PackageError, Error},
                service::package::PackageService,
                util::time::FixedClock,
            },
        };

        /// Expect a package with alcohol to be adult-only
        #[tokio::test]
        async fn derives_adult_only_from_products() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_product("Soup", false)
                .with_product("Beer", true)
                .build()
                .await?;

            let clock = FixedClock::new(test_now());
            let package_service = PackageService::new(&test.db, &clock);
            let package = package_service
                .create_package(new_package(vec![1, 2]))
                .await
                .unwrap();

            assert!(package.is_adult_only);
            assert!(!package.is_reserved);
            assert_eq!(package.products, vec!["Beer".to_string(), "Soup".to_string()]);

            Ok(())
        }

        /// Expect a package without alcohol to be open to everyone
        #[tokio::test]
        async fn regular_package_without_alcohol() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_product("Soup", false)
                .build()
                .await?;

            let clock = FixedClock::new(test_now());
            let package_service = PackageService::new(&test.db, &clock);
            let package = package_service
                .create_package(new_package(vec![1]))
                .await
                .unwrap();

            assert!(!package.is_adult_only);

            Ok(())
        }

        /// Expect Error when the deadline is not before the pickup time
        #[tokio::test]
        async fn rejects_deadline_after_pickup() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_product("Soup", false)
                .build()
                .await?;

            let clock = FixedClock::new(test_now());
            let package_service = PackageService::new(&test.db, &clock);
            let package = NewPackage {
                last_reservation_at: test_now() + Duration::hours(6),
                ..new_package(vec![1])
            };
            let result = package_service.create_package(package).await;

            assert!(matches!(
                result,
                Err(Error::PackageError(PackageError::DeadlineNotBeforePickup))
            ));

            Ok(())
        }

        /// Expect Error when the pickup time has passed
        #[tokio::test]
        async fn rejects_past_pickup() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_product("Soup", false)
                .build()
                .await?;

            let clock = FixedClock::new(test_now());
            let package_service = PackageService::new(&test.db, &clock);
            let package = NewPackage {
                pickup_at: test_now() - Duration::hours(1),
                last_reservation_at: test_now() - Duration::hours(2),
                ..new_package(vec![1])
            };
            let result = package_service.create_package(package).await;

            assert!(matches!(
                result,
                Err(Error::PackageError(PackageError::PickupNotInFuture))
            ));

            Ok(())
        }

        /// Expect Error listing product IDs that do not exist
        #[tokio::test]
        async fn rejects_unknown_products() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_product("Soup", false)
                .build()
                .await?;

            let clock = FixedClock::new(test_now());
            let package_service = PackageService::new(&test.db, &clock);
            let result = package_service.create_package(new_package(vec![1, 7])).await;

            assert!(matches!(
                result,
                Err(Error::PackageError(PackageError::UnknownProducts(ref ids))) if ids == &vec![7]
            ));
            assert!(package_service
                .get_packages_by_cafeteria(TEST_CAFETERIA)
                .await
                .unwrap()
                .is_empty());

            Ok(())
        }

        /// Expect Error for a blank name or missing products
        #[tokio::test]
        async fn rejects_incomplete_package() -> Result<(), TestError> {
            let test = test_setup_with_reservation_tables!()?;

            let clock = FixedClock::new(test_now());
            let package_service = PackageService::new(&test.db, &clock);

            let blank = NewPackage {
                name: "  ".to_string(),
                ..new_package(vec![1])
            };
            let negative = NewPackage {
                price_cents: -1,
                ..new_package(vec![1])
            };

            assert!(matches!(
                package_service.create_package(blank).await,
                Err(Error::PackageError(PackageError::BlankName))
            ));
            assert!(matches!(
                package_service.create_package(new_package(vec![])).await,
                Err(Error::PackageError(PackageError::NoProducts))
            ));
            assert!(matches!(
                package_service.create_package(negative).await,
                Err(Error::PackageError(PackageError::NegativePrice))
            ));

            Ok(())
        }
    }

    mod update_package {
        use chrono::Duration;
        use mealbox_test_utils::prelude::*;

        use super::new_package;
        use crate::server::{
            error::{package::PackageError, Error},
            service::package::PackageService,
            util::time::FixedClock,
        };

        /// Expect the adult-only flag to follow the new product list
        #[tokio::test]
        async fn rederives_adult_only() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_product("Soup", false)
                .with_product("Wine", true)
                .build()
                .await?;
            let now = test_now();
            let package = test
                .package()
                .insert_mock_adult_package(now + Duration::hours(6), now + Duration::hours(4))
                .await?;
            test.package().link_product(package.id, 2).await?;

            let clock = FixedClock::new(now);
            let package_service = PackageService::new(&test.db, &clock);
            let updated = package_service
                .update_package(package.id, new_package(vec![1]))
                .await
                .unwrap();

            assert!(!updated.is_adult_only);
            assert_eq!(updated.products, vec!["Soup".to_string()]);

            Ok(())
        }

        /// Expect Error when the package has been reserved
        #[tokio::test]
        async fn rejects_reserved_package() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_student(1001, date(2000, 1, 1))
                .with_product("Soup", false)
                .build()
                .await?;
            let now = test_now();
            let package = test
                .package()
                .insert_mock_package(now + Duration::hours(6), now + Duration::hours(4))
                .await?;
            test.reservation()
                .insert_reservation(package.id, 1001)
                .await?;

            let clock = FixedClock::new(now);
            let package_service = PackageService::new(&test.db, &clock);
            let result = package_service
                .update_package(package.id, new_package(vec![1]))
                .await;

            assert!(matches!(
                result,
                Err(Error::PackageError(PackageError::AlreadyReserved(id))) if id == package.id
            ));

            Ok(())
        }

        /// Expect Error when the package does not exist
        #[tokio::test]
        async fn rejects_missing_package() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_product("Soup", false)
                .build()
                .await?;

            let clock = FixedClock::new(test_now());
            let package_service = PackageService::new(&test.db, &clock);
            let result = package_service.update_package(42, new_package(vec![1])).await;

            assert!(matches!(
                result,
                Err(Error::PackageError(PackageError::NotFound(42)))
            ));

            Ok(())
        }
    }

    mod delete_package {
        use chrono::Duration;
        use mealbox_test_utils::prelude::*;

        use crate::server::{
            error::{package::PackageError, Error},
            service::package::PackageService,
            util::time::FixedClock,
        };

        /// Expect an unreserved package to be removed with its product links
        #[tokio::test]
        async fn deletes_unreserved_package() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_product("Soup", false)
                .build()
                .await?;
            let now = test_now();
            let package = test
                .package()
                .insert_mock_package(now + Duration::hours(6), now + Duration::hours(4))
                .await?;
            test.package().link_product(package.id, 1).await?;

            let clock = FixedClock::new(now);
            let package_service = PackageService::new(&test.db, &clock);
            let result = package_service.delete_package(package.id).await;

            assert!(result.is_ok());
            assert!(package_service.get_package(package.id).await.unwrap().is_none());

            Ok(())
        }

        /// Expect Error when the package has been reserved
        #[tokio::test]
        async fn rejects_reserved_package() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_student(1001, date(2000, 1, 1))
                .build()
                .await?;
            let now = test_now();
            let package = test
                .package()
                .insert_mock_package(now + Duration::hours(6), now + Duration::hours(4))
                .await?;
            test.reservation()
                .insert_reservation(package.id, 1001)
                .await?;

            let clock = FixedClock::new(now);
            let package_service = PackageService::new(&test.db, &clock);
            let result = package_service.delete_package(package.id).await;

            assert!(matches!(
                result,
                Err(Error::PackageError(PackageError::AlreadyReserved(_)))
            ));
            assert_eq!(test.reservation().count().await?, 1);

            Ok(())
        }
    }

    mod get_packages_by_cafeteria {
        use chrono::Duration;
        use mealbox_test_utils::prelude::*;

        use crate::server::{service::package::PackageService, util::time::FixedClock};

        /// Expect reserved packages to be listed and flagged, other cafeterias skipped
        #[tokio::test]
        async fn lists_inventory_with_reserved_flag() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_student(1001, date(2000, 1, 1))
                .build()
                .await?;
            let now = test_now();
            let reserved = test
                .package()
                .insert_mock_package(now + Duration::hours(2), now + Duration::hours(1))
                .await?;
            let open = test
                .package()
                .insert_mock_package(now + Duration::hours(6), now + Duration::hours(4))
                .await?;
            test.package()
                .insert(entity::package::Model {
                    cafeteria: "Lovensdijkstraat LD".to_string(),
                    ..factory::mock_package_model(now + Duration::hours(3), now + Duration::hours(1))
                })
                .await?;
            test.reservation()
                .insert_reservation(reserved.id, 1001)
                .await?;

            let clock = FixedClock::new(now);
            let package_service = PackageService::new(&test.db, &clock);
            let packages = package_service
                .get_packages_by_cafeteria(TEST_CAFETERIA)
                .await
                .unwrap();

            let summary: Vec<(i32, bool)> = packages.iter().map(|p| (p.id, p.is_reserved)).collect();
            assert_eq!(summary, vec![(reserved.id, true), (open.id, false)]);

            Ok(())
        }
    }
}
