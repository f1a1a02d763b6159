use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of meal a package contains.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    #[sea_orm(string_value = "bread")]
    Bread,
    #[sea_orm(string_value = "warm_meal")]
    WarmMeal,
    #[sea_orm(string_value = "drinks")]
    Drinks,
    #[sea_orm(string_value = "snacks")]
    Snacks,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "package")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub cafeteria: String,
    pub city: String,
    pub meal_type: MealType,
    pub price_cents: i64,
    pub pickup_at: DateTime,
    /// Always strictly before `pickup_at`
    pub last_reservation_at: DateTime,
    /// True iff any linked product contains alcohol
    pub is_adult_only: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::reservation::Entity")]
    Reservation,
    #[sea_orm(has_many = "super::package_product::Entity")]
    PackageProduct,
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl Related<super::package_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PackageProduct.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::package_product::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::package_product::Relation::Package.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
