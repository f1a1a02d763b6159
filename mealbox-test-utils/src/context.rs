//! Test context returned by [`TestBuilder`](crate::TestBuilder).
//!
//! Wraps a connection to a private in-memory SQLite database. The pool is
//! capped at a single connection since every SQLite memory connection would
//! otherwise open its own empty database.

use sea_orm::{
    sea_query::TableCreateStatement, ConnectOptions, ConnectionTrait, Database,
    DatabaseConnection,
};

use crate::error::TestError;

/// Test environment holding the database connection.
///
/// ```ignore
/// let test = TestBuilder::new().with_reservation_tables().build().await?;
///
/// let student = test.student().insert_student(1001, date(2000, 1, 1)).await?;
/// let service = NoShowService::new(&test.db);
/// ```
pub struct TestContext {
    /// Connection to the in-memory SQLite database
    pub db: DatabaseConnection,
}

impl TestContext {
    /// Create a new test context with an empty in-memory database.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Connected context without any tables
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub async fn new() -> Result<Self, TestError> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).sqlx_logging(false);

        let db = Database::connect(opt).await?;

        Ok(Self { db })
    }

    /// Execute CREATE TABLE statements against the test database.
    ///
    /// # Arguments
    /// - `stmts` - Statements to execute in order
    ///
    /// # Returns
    /// - `Ok(())` - All tables created
    /// - `Err(TestError::DbErr)` - Table creation failed
    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }
}
