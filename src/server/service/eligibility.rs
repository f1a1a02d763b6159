//! Age eligibility for adult-only packages.

use chrono::NaiveDate;

use crate::server::util::time::age_on;

/// Minimum age for reserving a package that contains alcohol.
pub const ADULT_AGE: i32 = 18;

/// Returns true when the student may take the package on `reference_date`.
///
/// Packages without alcohol are open to everyone. For adult-only packages the
/// student must be at least [`ADULT_AGE`] on `reference_date`; the 18th birthday
/// itself counts.
///
/// # Arguments
/// - `student` - Student requesting the package
/// - `package` - Package being evaluated
/// - `reference_date` - Date the age is evaluated on (the pickup date when reserving)
pub fn is_eligible(
    student: &entity::student::Model,
    package: &entity::package::Model,
    reference_date: NaiveDate,
) -> bool {
    !package.is_adult_only || is_adult_on(student.date_of_birth, reference_date)
}

/// Returns true when someone born on `date_of_birth` is an adult on `reference_date`.
pub fn is_adult_on(date_of_birth: NaiveDate, reference_date: NaiveDate) -> bool {
    age_on(date_of_birth, reference_date) >= ADULT_AGE
}
