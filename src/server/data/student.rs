use chrono::NaiveDateTime;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter,
};

use crate::model::student::NewStudent;

pub struct StudentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StudentRepository<'a, C> {
    /// Creates a new instance of [`StudentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a student with a zero no-show count
    pub async fn create(
        &self,
        student: NewStudent,
        created_at: NaiveDateTime,
    ) -> Result<entity::student::Model, DbErr> {
        let student = entity::student::ActiveModel {
            student_number: ActiveValue::Set(student.student_number),
            identity_id: ActiveValue::Set(student.identity_id),
            name: ActiveValue::Set(student.name),
            email: ActiveValue::Set(student.email),
            date_of_birth: ActiveValue::Set(student.date_of_birth),
            city: ActiveValue::Set(student.city),
            no_show_count: ActiveValue::Set(0),
            version: ActiveValue::Set(0),
            created_at: ActiveValue::Set(created_at),
        };

        student.insert(self.db).await
    }

    pub async fn get_by_number(
        &self,
        student_number: i32,
    ) -> Result<Option<entity::student::Model>, DbErr> {
        entity::prelude::Student::find_by_id(student_number)
            .one(self.db)
            .await
    }

    /// Get a student by the id of their external identity
    pub async fn get_by_identity(
        &self,
        identity_id: &str,
    ) -> Result<Option<entity::student::Model>, DbErr> {
        entity::prelude::Student::find()
            .filter(entity::student::Column::IdentityId.eq(identity_id))
            .one(self.db)
            .await
    }

    /// Writes a new no-show count if the row is still at `expected_version`
    ///
    /// The version is bumped together with the count.
    ///
    /// # Returns
    /// - `Ok(true)` - Count written
    /// - `Ok(false)` - Row was changed by another writer (or no longer exists)
    /// - `Err(DbErr)` - Database error
    pub async fn update_no_show_count(
        &self,
        student_number: i32,
        no_show_count: i32,
        expected_version: i32,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Student::update_many()
            .col_expr(
                entity::student::Column::NoShowCount,
                Expr::value(no_show_count),
            )
            .col_expr(
                entity::student::Column::Version,
                Expr::value(expected_version + 1),
            )
            .filter(entity::student::Column::StudentNumber.eq(student_number))
            .filter(entity::student::Column::Version.eq(expected_version))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}

#[cfg(test)]
mod tests {
    mod create {
        use mealbox_test_utils::prelude::*;

        use crate::{model::student::NewStudent, server::data::student::StudentRepository};

        fn new_student(student_number: i32, identity_id: &str) -> NewStudent {
            NewStudent {
                student_number,
                identity_id: identity_id.to_string(),
                name: "Sam".to_string(),
                email: "sam@student.example.com".to_string(),
                date_of_birth: date(2001, 6, 15),
                city: TEST_CITY.to_string(),
            }
        }

        /// Expect a new student to start without no-shows
        #[tokio::test]
        async fn creates_student_without_no_shows() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::Student)?;

            let student_repo = StudentRepository::new(&test.db);
            let student = student_repo
                .create(new_student(1001, "identity-1001"), test_now())
                .await?;

            assert_eq!(student.student_number, 1001);
            assert_eq!(student.no_show_count, 0);
            assert_eq!(student.version, 0);

            Ok(())
        }

        /// Expect Error when the identity is already linked to another student
        #[tokio::test]
        async fn fails_for_duplicate_identity() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::Student)?;

            let student_repo = StudentRepository::new(&test.db);
            student_repo
                .create(new_student(1001, "identity-1001"), test_now())
                .await?;
            let result = student_repo
                .create(new_student(1002, "identity-1001"), test_now())
                .await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod get_by_identity {
        use mealbox_test_utils::prelude::*;

        use crate::server::data::student::StudentRepository;

        /// Expect Some when the identity belongs to a student
        #[tokio::test]
        async fn finds_student_by_identity() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_student(1001, date(2000, 1, 1))
                .build()
                .await?;

            let student_repo = StudentRepository::new(&test.db);
            let result = student_repo
                .get_by_identity(&factory::identity_for(1001))
                .await?;

            assert_eq!(result.map(|s| s.student_number), Some(1001));

            Ok(())
        }

        /// Expect None for an unknown identity
        #[tokio::test]
        async fn returns_none_for_unknown_identity() -> Result<(), TestError> {
            let test = test_setup_with_reservation_tables!()?;

            let student_repo = StudentRepository::new(&test.db);
            let result = student_repo.get_by_identity("nobody").await?;

            assert!(result.is_none());

            Ok(())
        }

        /// Expect Error when required tables are not present
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            let student_repo = StudentRepository::new(&test.db);
            let result = student_repo.get_by_identity("identity-1001").await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod update_no_show_count {
        use mealbox_test_utils::prelude::*;

        use crate::server::data::student::StudentRepository;

        /// Expect the count to be written and the version bumped
        #[tokio::test]
        async fn updates_count_at_expected_version() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_student(1001, date(2000, 1, 1))
                .build()
                .await?;

            let student_repo = StudentRepository::new(&test.db);
            let written = student_repo.update_no_show_count(1001, 1, 0).await?;

            assert!(written);
            let student = test.student().get(1001).await?.unwrap();
            assert_eq!(student.no_show_count, 1);
            assert_eq!(student.version, 1);

            Ok(())
        }

        /// Expect nothing to be written when the version has moved on
        #[tokio::test]
        async fn rejects_stale_version() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_student(1001, date(2000, 1, 1))
                .build()
                .await?;

            let student_repo = StudentRepository::new(&test.db);
            assert!(student_repo.update_no_show_count(1001, 1, 0).await?);
            let written = student_repo.update_no_show_count(1001, 5, 0).await?;

            assert!(!written);
            let student = test.student().get(1001).await?.unwrap();
            assert_eq!(student.no_show_count, 1);

            Ok(())
        }
    }
}
