//! Test harness for the mealbox workspace.
//!
//! Tests build an in-memory SQLite database with [`TestBuilder`] (or the
//! `test_setup_with_*` macros) and then insert fixtures through the helpers on
//! [`TestContext`]:
//!
//! ```ignore
//! let test = TestBuilder::new()
//!     .with_reservation_tables()
//!     .with_student(1001, date(2000, 1, 1))
//!     .build()
//!     .await?;
//!
//! let package = test.package().insert(mock_package_model(pickup, deadline)).await?;
//! ```

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod setup;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{date, datetime, test_now, TEST_CAFETERIA, TEST_CITY},
        fixtures::factory,
        test_setup_with_reservation_tables, test_setup_with_tables, TestBuilder, TestContext,
        TestError,
    };
}
