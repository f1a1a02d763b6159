/// Create a [`TestContext`](crate::TestContext) with tables for the given entities.
///
/// ```ignore
/// let test = test_setup_with_tables!(entity::prelude::Product)?;
/// ```
#[macro_export]
macro_rules! test_setup_with_tables {
    () => {{
        $crate::TestContext::new().await
    }};

    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = $crate::TestContext::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

/// Create a [`TestContext`](crate::TestContext) with every table the reservation flow touches.
#[macro_export]
macro_rules! test_setup_with_reservation_tables {
    () => {{
        async {
            let setup = $crate::TestContext::new().await?;
            setup
                .with_tables($crate::builder::reservation_tables())
                .await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}
