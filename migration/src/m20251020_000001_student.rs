use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(integer(Student::StudentNumber).primary_key())
                    .col(string_uniq(Student::IdentityId))
                    .col(string(Student::Name))
                    .col(string(Student::Email))
                    .col(date(Student::DateOfBirth))
                    .col(string(Student::City))
                    .col(integer(Student::NoShowCount).default(0))
                    .col(integer(Student::Version).default(0))
                    .col(timestamp(Student::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Student {
    Table,
    StudentNumber,
    IdentityId,
    Name,
    Email,
    DateOfBirth,
    City,
    NoShowCount,
    Version,
    CreatedAt,
}
