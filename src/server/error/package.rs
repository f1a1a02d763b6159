use thiserror::Error;

/// Rejections of the inventory management flows.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PackageError {
    #[error("Package name must not be empty")]
    BlankName,
    #[error("Product name must not be empty")]
    BlankProductName,
    #[error("The last reservation time must be before the pickup time")]
    DeadlineNotBeforePickup,
    #[error("The pickup time must be in the future")]
    PickupNotInFuture,
    #[error("Price must not be negative")]
    NegativePrice,
    #[error("A package must contain at least one product")]
    NoProducts,
    #[error("Unknown product IDs: {0:?}")]
    UnknownProducts(Vec<i32>),
    #[error("Package {0} was not found")]
    NotFound(i32),
    #[error("Package {0} has been reserved and can no longer be changed")]
    AlreadyReserved(i32),
}
