use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_number: i32,
    /// Opaque id of the account in the external identity provider
    #[sea_orm(unique)]
    pub identity_id: String,
    pub name: String,
    pub email: String,
    pub date_of_birth: Date,
    pub city: String,
    pub no_show_count: i32,
    /// Row version, bumped on every no-show counter write
    pub version: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservation,
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
