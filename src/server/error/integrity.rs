use thiserror::Error;

/// Faults where data referenced by an operation no longer exists.
///
/// These are not user-recoverable; callers should treat them as internal failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("Student {0} referenced by a reservation was not found")]
    StudentNotFound(i32),
    #[error("Reservation {0} was not found")]
    ReservationNotFound(i32),
    #[error("Package {package_id} or student {student_number} disappeared before the reservation was stored")]
    ReservationTargetVanished {
        package_id: i32,
        student_number: i32,
    },
}
