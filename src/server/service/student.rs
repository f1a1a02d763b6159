//! Student registration.

use sea_orm::DatabaseConnection;

use crate::{
    model::student::{NewStudent, StudentDto},
    server::{
        data::StudentRepository,
        error::{is_unique_violation, student::StudentError, Error},
        util::time::{age_on, Clock},
    },
};

/// Minimum age on the registration date.
pub const MIN_REGISTRATION_AGE: i32 = 16;

pub struct StudentService<'a> {
    db: &'a DatabaseConnection,
    clock: &'a dyn Clock,
}

impl<'a> StudentService<'a> {
    /// Creates a new instance of [`StudentService`]
    pub fn new(db: &'a DatabaseConnection, clock: &'a dyn Clock) -> Self {
        Self { db, clock }
    }

    /// Registers a student without prior no-shows
    ///
    /// # Returns
    /// - `Ok(StudentDto)` - Registered student
    /// - `Err(Error::StudentError)` - Validation failed, or the student number or identity is taken
    /// - `Err(Error::DbErr)` - Database error
    pub async fn register(&self, student: NewStudent) -> Result<StudentDto, Error> {
        let student_repo = StudentRepository::new(self.db);

        let now = self.clock.now();
        let today = now.date();

        let student = NewStudent {
            name: student.name.trim().to_string(),
            ..student
        };

        if student.name.is_empty() {
            return Err(StudentError::BlankName.into());
        }
        if student.date_of_birth > today {
            return Err(StudentError::DateOfBirthInFuture.into());
        }
        if age_on(student.date_of_birth, today) < MIN_REGISTRATION_AGE {
            return Err(StudentError::TooYoung {
                min_age: MIN_REGISTRATION_AGE,
            }
            .into());
        }

        let student_number = student.student_number;
        let identity_id = student.identity_id.clone();

        if student_repo.get_by_number(student_number).await?.is_some() {
            return Err(StudentError::DuplicateStudentNumber(student_number).into());
        }
        if student_repo.get_by_identity(&identity_id).await?.is_some() {
            return Err(StudentError::DuplicateIdentity(identity_id).into());
        }

        match student_repo.create(student, now).await {
            Ok(created) => {
                tracing::info!("Registered student {}", created.student_number);

                Ok(created.into())
            }
            // Registered concurrently between the checks and the insert
            Err(e) if is_unique_violation(&e) => {
                if student_repo.get_by_number(student_number).await?.is_some() {
                    Err(StudentError::DuplicateStudentNumber(student_number).into())
                } else {
                    Err(StudentError::DuplicateIdentity(identity_id).into())
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get the student linked to `identity_id`
    pub async fn get_student(&self, identity_id: &str) -> Result<Option<StudentDto>, Error> {
        let student = StudentRepository::new(self.db)
            .get_by_identity(identity_id)
            .await?;

        Ok(student.map(StudentDto::from))
    }
}

#[cfg(test)]
mod tests {
    use mealbox_test_utils::prelude::*;

    use crate::model::student::NewStudent;

    fn new_student(student_number: i32, identity_id: &str) -> NewStudent {
        NewStudent {
            student_number,
            identity_id: identity_id.to_string(),
            name: "Robin".to_string(),
            email: "robin@student.example.com".to_string(),
            date_of_birth: date(2003, 9, 1),
            city: TEST_CITY.to_string(),
        }
    }

    mod register {
        use mealbox_test_utils::prelude::*;

        use super::new_student;
        use crate::{
            model::student::NewStudent,
            server::{
                error::{student::StudentError, Error},
                service::student::StudentService,
                util::time::FixedClock,
            },
        };

        /// Expect a new student without no-shows
        #[tokio::test]
        async fn registers_student() -> Result<(), TestError> {
            let test = test_setup_with_reservation_tables!()?;

            let clock = FixedClock::new(test_now());
            let student_service = StudentService::new(&test.db, &clock);
            let student = student_service
                .register(new_student(2001, "identity-2001"))
                .await
                .unwrap();

            assert_eq!(student.student_number, 2001);
            assert_eq!(student.no_show_count, 0);

            Ok(())
        }

        /// Expect Error when the student number is taken
        #[tokio::test]
        async fn rejects_duplicate_student_number() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_student(2001, date(2000, 1, 1))
                .build()
                .await?;

            let clock = FixedClock::new(test_now());
            let student_service = StudentService::new(&test.db, &clock);
            let result = student_service
                .register(new_student(2001, "identity-new"))
                .await;

            assert!(matches!(
                result,
                Err(Error::StudentError(StudentError::DuplicateStudentNumber(2001)))
            ));

            Ok(())
        }

        /// Expect Error when the identity is linked to another student
        #[tokio::test]
        async fn rejects_duplicate_identity() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_student(2001, date(2000, 1, 1))
                .build()
                .await?;

            let clock = FixedClock::new(test_now());
            let student_service = StudentService::new(&test.db, &clock);
            let result = student_service
                .register(new_student(2002, &factory::identity_for(2001)))
                .await;

            assert!(matches!(
                result,
                Err(Error::StudentError(StudentError::DuplicateIdentity(_)))
            ));

            Ok(())
        }

        /// Expect Error for students younger than 16 or born in the future
        #[tokio::test]
        async fn rejects_invalid_date_of_birth() -> Result<(), TestError> {
            let test = test_setup_with_reservation_tables!()?;

            let clock = FixedClock::new(test_now());
            let student_service = StudentService::new(&test.db, &clock);

            let too_young = NewStudent {
                date_of_birth: date(2009, 3, 11),
                ..new_student(2001, "identity-2001")
            };
            let unborn = NewStudent {
                date_of_birth: date(2025, 3, 11),
                ..new_student(2002, "identity-2002")
            };

            assert!(matches!(
                student_service.register(too_young).await,
                Err(Error::StudentError(StudentError::TooYoung { min_age: 16 }))
            ));
            assert!(matches!(
                student_service.register(unborn).await,
                Err(Error::StudentError(StudentError::DateOfBirthInFuture))
            ));

            Ok(())
        }

        /// Expect a student turning 16 today to be accepted
        #[tokio::test]
        async fn accepts_sixteenth_birthday() -> Result<(), TestError> {
            let test = test_setup_with_reservation_tables!()?;

            let clock = FixedClock::new(test_now());
            let student_service = StudentService::new(&test.db, &clock);
            let student = NewStudent {
                date_of_birth: date(2009, 3, 10),
                ..new_student(2001, "identity-2001")
            };

            assert!(student_service.register(student).await.is_ok());

            Ok(())
        }

        /// Expect Error for a blank name
        #[tokio::test]
        async fn rejects_blank_name() -> Result<(), TestError> {
            let test = test_setup_with_reservation_tables!()?;

            let clock = FixedClock::new(test_now());
            let student_service = StudentService::new(&test.db, &clock);
            let student = NewStudent {
                name: " ".to_string(),
                ..new_student(2001, "identity-2001")
            };

            assert!(matches!(
                student_service.register(student).await,
                Err(Error::StudentError(StudentError::BlankName))
            ));

            Ok(())
        }
    }

    mod get_student {
        use mealbox_test_utils::prelude::*;

        use crate::server::{service::student::StudentService, util::time::FixedClock};

        /// Expect None for an unknown identity and Some for a registered one
        #[tokio::test]
        async fn finds_student_by_identity() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_reservation_tables()
                .with_student_no_shows(2001, date(2000, 1, 1), 1)
                .build()
                .await?;

            let clock = FixedClock::new(test_now());
            let student_service = StudentService::new(&test.db, &clock);

            let found = student_service
                .get_student(&factory::identity_for(2001))
                .await
                .unwrap();
            let missing = student_service.get_student("nobody").await.unwrap();

            assert_eq!(found.map(|s| s.no_show_count), Some(1));
            assert!(missing.is_none());

            Ok(())
        }
    }
}
