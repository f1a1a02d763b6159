use sea_orm_migration::{prelude::*, schema::*};

static IDX_PACKAGE_PICKUP_AT: &str = "idx-package-pickup_at";
static IDX_PACKAGE_CAFETERIA: &str = "idx-package-cafeteria";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Package::Table)
                    .if_not_exists()
                    .col(pk_auto(Package::Id))
                    .col(string(Package::Name))
                    .col(string(Package::Cafeteria))
                    .col(string(Package::City))
                    .col(string_len(Package::MealType, 16))
                    .col(big_integer(Package::PriceCents))
                    .col(timestamp(Package::PickupAt))
                    .col(timestamp(Package::LastReservationAt))
                    .col(boolean(Package::IsAdultOnly).default(false))
                    .col(timestamp(Package::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PACKAGE_PICKUP_AT)
                    .table(Package::Table)
                    .col(Package::PickupAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PACKAGE_CAFETERIA)
                    .table(Package::Table)
                    .col(Package::Cafeteria)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PACKAGE_CAFETERIA)
                    .table(Package::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PACKAGE_PICKUP_AT)
                    .table(Package::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Package::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Package {
    Table,
    Id,
    Name,
    Cafeteria,
    City,
    MealType,
    PriceCents,
    PickupAt,
    LastReservationAt,
    IsAdultOnly,
    CreatedAt,
}
