//! Factory functions for in-memory entity models.
//!
//! Models built here are not persisted. Use them directly for pure-function
//! tests, or pass them to the insert helpers (ids are ignored on insert).

use chrono::{NaiveDate, NaiveDateTime};
use entity::package::MealType;

use crate::{
    constant::{test_now, TEST_CAFETERIA, TEST_CITY},
    model::{PackageModel, ReservationModel, StudentModel},
};

/// Identity id assigned to mock students.
pub fn identity_for(student_number: i32) -> String {
    format!("identity-{}", student_number)
}

/// Create a mock student model.
///
/// # Arguments
/// - `student_number` - Student number (primary key)
/// - `date_of_birth` - Date of birth used by age checks
pub fn mock_student_model(student_number: i32, date_of_birth: NaiveDate) -> StudentModel {
    StudentModel {
        student_number,
        identity_id: identity_for(student_number),
        name: format!("Student {}", student_number),
        email: format!("{}@student.example.com", student_number),
        date_of_birth,
        city: TEST_CITY.to_string(),
        no_show_count: 0,
        version: 0,
        created_at: test_now(),
    }
}

/// Create a mock package model without alcohol.
///
/// # Arguments
/// - `pickup_at` - Pickup timestamp
/// - `last_reservation_at` - Reservation deadline, expected before `pickup_at`
pub fn mock_package_model(
    pickup_at: NaiveDateTime,
    last_reservation_at: NaiveDateTime,
) -> PackageModel {
    PackageModel {
        id: 1,
        name: "Surprise box".to_string(),
        cafeteria: TEST_CAFETERIA.to_string(),
        city: TEST_CITY.to_string(),
        meal_type: MealType::WarmMeal,
        price_cents: 450,
        pickup_at,
        last_reservation_at,
        is_adult_only: false,
        created_at: test_now(),
    }
}

/// Create a mock adult-only package model.
pub fn mock_adult_package_model(
    pickup_at: NaiveDateTime,
    last_reservation_at: NaiveDateTime,
) -> PackageModel {
    PackageModel {
        name: "Borrel box".to_string(),
        meal_type: MealType::Drinks,
        is_adult_only: true,
        ..mock_package_model(pickup_at, last_reservation_at)
    }
}

/// Create a mock pending reservation model.
pub fn mock_reservation_model(package_id: i32, student_number: i32) -> ReservationModel {
    ReservationModel {
        id: 1,
        package_id,
        student_number,
        reserved_at: test_now(),
        is_picked_up: false,
        is_no_show: false,
    }
}
