use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251020_000002_product::Product, m20251020_000003_package::Package};

static FK_PACKAGE_PRODUCT_PACKAGE_ID: &str = "fk-package_product-package_id";
static FK_PACKAGE_PRODUCT_PRODUCT_ID: &str = "fk-package_product-product_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PackageProduct::Table)
                    .if_not_exists()
                    .col(integer(PackageProduct::PackageId))
                    .col(integer(PackageProduct::ProductId))
                    .primary_key(
                        Index::create()
                            .col(PackageProduct::PackageId)
                            .col(PackageProduct::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_PACKAGE_PRODUCT_PACKAGE_ID)
                            .from(PackageProduct::Table, PackageProduct::PackageId)
                            .to(Package::Table, Package::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_PACKAGE_PRODUCT_PRODUCT_ID)
                            .from(PackageProduct::Table, PackageProduct::ProductId)
                            .to(Product::Table, Product::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PackageProduct::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PackageProduct {
    Table,
    PackageId,
    ProductId,
}
