pub use sea_orm_migration::prelude::*;

mod m20251020_000001_student;
mod m20251020_000002_product;
mod m20251020_000003_package;
mod m20251020_000004_package_product;
mod m20251020_000005_reservation;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251020_000001_student::Migration),
            Box::new(m20251020_000002_product::Migration),
            Box::new(m20251020_000003_package::Migration),
            Box::new(m20251020_000004_package_product::Migration),
            Box::new(m20251020_000005_reservation::Migration),
        ]
    }
}
