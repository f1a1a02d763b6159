use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered student.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDto {
    pub student_number: i32,
    pub name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
    pub no_show_count: i32,
}

impl From<entity::student::Model> for StudentDto {
    fn from(student: entity::student::Model) -> Self {
        Self {
            student_number: student.student_number,
            name: student.name,
            email: student.email,
            date_of_birth: student.date_of_birth,
            city: student.city,
            no_show_count: student.no_show_count,
        }
    }
}

/// Input for registering a student.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub student_number: i32,
    pub identity_id: String,
    pub name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
}
