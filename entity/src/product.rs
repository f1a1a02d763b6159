use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub contains_alcohol: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::package_product::Entity")]
    PackageProduct,
}

impl Related<super::package_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PackageProduct.def()
    }
}

impl Related<super::package::Entity> for Entity {
    fn to() -> RelationDef {
        super::package_product::Relation::Package.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::package_product::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
