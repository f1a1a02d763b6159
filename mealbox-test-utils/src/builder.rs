//! Declarative test builder.
//!
//! Configuration methods queue tables and fixtures; everything is executed in
//! order by [`TestBuilder::build`].

use chrono::NaiveDate;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// CREATE TABLE statements for every entity the reservation flow touches,
/// ordered so that referenced tables exist first.
pub fn reservation_tables() -> Vec<TableCreateStatement> {
    let schema = Schema::new(sea_orm::DbBackend::Sqlite);
    vec![
        schema.create_table_from_entity(entity::prelude::Student),
        schema.create_table_from_entity(entity::prelude::Product),
        schema.create_table_from_entity(entity::prelude::Package),
        schema.create_table_from_entity(entity::prelude::PackageProduct),
        schema.create_table_from_entity(entity::prelude::Reservation),
    ]
}

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_reservation_tables: bool,

    // (student_number, date_of_birth, no_show_count)
    students: Vec<(i32, NaiveDate, i32)>,
    // (name, contains_alcohol)
    products: Vec<(String, bool)>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Create a builder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_reservation_tables: false,
            students: Vec::new(),
            products: Vec::new(),
        }
    }

    /// Add the student, product, package, package product and reservation tables.
    pub fn with_reservation_tables(mut self) -> Self {
        self.include_reservation_tables = true;
        self
    }

    /// Add a single entity table.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mealbox_test_utils::TestBuilder;
    ///
    /// # async fn example() -> Result<(), mealbox_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(entity::prelude::Product)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a student without prior no-shows.
    ///
    /// The identity id of the student is derived from the student number, see
    /// [`factory::identity_for`](crate::fixtures::factory::identity_for).
    pub fn with_student(mut self, student_number: i32, date_of_birth: NaiveDate) -> Self {
        self.students.push((student_number, date_of_birth, 0));
        self
    }

    /// Insert a student with an existing no-show count.
    pub fn with_student_no_shows(
        mut self,
        student_number: i32,
        date_of_birth: NaiveDate,
        no_show_count: i32,
    ) -> Self {
        self.students
            .push((student_number, date_of_birth, no_show_count));
        self
    }

    /// Insert a product into the catalog.
    pub fn with_product(mut self, name: impl Into<String>, contains_alcohol: bool) -> Self {
        self.products.push((name.into(), contains_alcohol));
        self
    }

    /// Build the test context.
    ///
    /// Creates the reservation tables (if requested), then custom tables, then
    /// inserts queued students and products.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Configured test environment
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        let mut all_tables = Vec::new();
        if self.include_reservation_tables {
            all_tables.extend(reservation_tables());
        }
        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        for (student_number, date_of_birth, no_show_count) in self.students {
            setup
                .student()
                .insert_student_with_no_shows(student_number, date_of_birth, no_show_count)
                .await?;
        }

        for (name, contains_alcohol) in self.products {
            setup.product().insert_product(&name, contains_alcohol).await?;
        }

        Ok(setup)
    }
}
