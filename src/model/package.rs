use std::fmt;

use chrono::NaiveDateTime;
use entity::package::MealType;
use serde::{Deserialize, Serialize};

/// A meal package as shown to students and employees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackageDto {
    pub id: i32,
    pub name: String,
    pub cafeteria: String,
    pub city: String,
    pub meal_type: MealType,
    pub price_cents: i64,
    pub pickup_at: NaiveDateTime,
    pub last_reservation_at: NaiveDateTime,
    pub is_adult_only: bool,
    pub products: Vec<String>,
    pub is_reserved: bool,
}

impl PackageDto {
    /// Builds the DTO from a package row and the names of its products.
    pub fn from_model(
        package: entity::package::Model,
        products: Vec<String>,
        is_reserved: bool,
    ) -> Self {
        Self {
            id: package.id,
            name: package.name,
            cafeteria: package.cafeteria,
            city: package.city,
            meal_type: package.meal_type,
            price_cents: package.price_cents,
            pickup_at: package.pickup_at,
            last_reservation_at: package.last_reservation_at,
            is_adult_only: package.is_adult_only,
            products,
            is_reserved,
        }
    }
}

/// Input for creating or replacing a package.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewPackage {
    pub name: String,
    pub cafeteria: String,
    pub city: String,
    pub meal_type: MealType,
    pub price_cents: i64,
    pub pickup_at: NaiveDateTime,
    pub last_reservation_at: NaiveDateTime,
    pub product_ids: Vec<i32>,
}

/// Optional predicates narrowing the available package list.
///
/// All set predicates must hold; an empty filter matches everything.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageFilter {
    pub city: Option<String>,
    pub meal_type: Option<MealType>,
    pub max_price_cents: Option<i64>,
}

impl PackageFilter {
    /// Returns true when `package` satisfies every set predicate.
    pub fn matches(&self, package: &entity::package::Model) -> bool {
        self.city.as_ref().is_none_or(|city| &package.city == city)
            && self.meal_type.is_none_or(|meal_type| package.meal_type == meal_type)
            && self
                .max_price_cents
                .is_none_or(|max| package.price_cents <= max)
    }
}

/// Why a student cannot reserve an otherwise available package.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// The student already holds a reservation for the pickup date
    DuplicateDate,
    /// The student reached the no-show threshold
    TooManyNoShows,
    /// The package contains alcohol and the student is under 18
    AgeRestricted,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateDate => write!(f, "duplicate date"),
            Self::TooManyNoShows => write!(f, "too many no-shows"),
            Self::AgeRestricted => write!(f, "age restricted"),
        }
    }
}

/// An available package annotated with whether the requesting student may reserve it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedPackage {
    pub package: PackageDto,
    pub can_reserve: bool,
    pub block_reason: Option<BlockReason>,
}

/// A product from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub contains_alcohol: bool,
}

impl From<entity::product::Model> for ProductDto {
    fn from(product: entity::product::Model) -> Self {
        Self {
            id: product.id,
            name: product.name,
            contains_alcohol: product.contains_alcohol,
        }
    }
}
