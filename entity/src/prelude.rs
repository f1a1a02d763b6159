pub use super::package::Entity as Package;
pub use super::package_product::Entity as PackageProduct;
pub use super::product::Entity as Product;
pub use super::reservation::Entity as Reservation;
pub use super::student::Entity as Student;
