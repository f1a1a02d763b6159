use thiserror::Error;

/// Rejections of the student registration flow.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StudentError {
    #[error("Student name must not be empty")]
    BlankName,
    #[error("Date of birth must not be in the future")]
    DateOfBirthInFuture,
    #[error("Students must be at least {min_age} years old to register")]
    TooYoung { min_age: i32 },
    #[error("Student number {0} is already registered")]
    DuplicateStudentNumber(i32),
    #[error("Identity {0} is already linked to a student")]
    DuplicateIdentity(String),
}
