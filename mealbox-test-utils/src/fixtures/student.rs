use chrono::NaiveDate;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, fixtures::factory, model::StudentModel, TestContext};

impl TestContext {
    pub fn student(&self) -> StudentFixtures<'_> {
        StudentFixtures { setup: self }
    }
}

pub struct StudentFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> StudentFixtures<'a> {
    /// Insert a student without prior no-shows.
    pub async fn insert_student(
        &self,
        student_number: i32,
        date_of_birth: NaiveDate,
    ) -> Result<StudentModel, TestError> {
        self.insert_student_with_no_shows(student_number, date_of_birth, 0)
            .await
    }

    /// Insert a student with the given no-show count.
    pub async fn insert_student_with_no_shows(
        &self,
        student_number: i32,
        date_of_birth: NaiveDate,
        no_show_count: i32,
    ) -> Result<StudentModel, TestError> {
        let student = factory::mock_student_model(student_number, date_of_birth);

        Ok(
            entity::prelude::Student::insert(entity::student::ActiveModel {
                student_number: ActiveValue::Set(student.student_number),
                identity_id: ActiveValue::Set(student.identity_id),
                name: ActiveValue::Set(student.name),
                email: ActiveValue::Set(student.email),
                date_of_birth: ActiveValue::Set(student.date_of_birth),
                city: ActiveValue::Set(student.city),
                no_show_count: ActiveValue::Set(no_show_count),
                version: ActiveValue::Set(0),
                created_at: ActiveValue::Set(student.created_at),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Read a student back from the database.
    pub async fn get(&self, student_number: i32) -> Result<Option<StudentModel>, TestError> {
        Ok(entity::prelude::Student::find_by_id(student_number)
            .one(&self.setup.db)
            .await?)
    }
}
