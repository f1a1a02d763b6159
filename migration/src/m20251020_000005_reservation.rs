use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251020_000001_student::Student, m20251020_000003_package::Package};

static IDX_RESERVATION_STUDENT_NUMBER: &str = "idx-reservation-student_number";
static FK_RESERVATION_PACKAGE_ID: &str = "fk-reservation-package_id";
static FK_RESERVATION_STUDENT_NUMBER: &str = "fk-reservation-student_number";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(pk_auto(Reservation::Id))
                    // The unique index on package_id is what prevents double-booking
                    .col(integer_uniq(Reservation::PackageId))
                    .col(integer(Reservation::StudentNumber))
                    .col(timestamp(Reservation::ReservedAt))
                    .col(boolean(Reservation::IsPickedUp).default(false))
                    .col(boolean(Reservation::IsNoShow).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_RESERVATION_PACKAGE_ID)
                            .from(Reservation::Table, Reservation::PackageId)
                            .to(Package::Table, Package::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_RESERVATION_STUDENT_NUMBER)
                            .from(Reservation::Table, Reservation::StudentNumber)
                            .to(Student::Table, Student::StudentNumber),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RESERVATION_STUDENT_NUMBER)
                    .table(Reservation::Table)
                    .col(Reservation::StudentNumber)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_RESERVATION_STUDENT_NUMBER)
                    .table(Reservation::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Reservation::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Reservation {
    Table,
    Id,
    PackageId,
    StudentNumber,
    ReservedAt,
    IsPickedUp,
    IsNoShow,
}
