use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored reservation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDto {
    pub id: i32,
    pub package_id: i32,
    pub student_number: i32,
    pub reserved_at: NaiveDateTime,
    pub is_picked_up: bool,
    pub is_no_show: bool,
}

impl From<entity::reservation::Model> for ReservationDto {
    fn from(reservation: entity::reservation::Model) -> Self {
        Self {
            id: reservation.id,
            package_id: reservation.package_id,
            student_number: reservation.student_number,
            reserved_at: reservation.reserved_at,
            is_picked_up: reservation.is_picked_up,
            is_no_show: reservation.is_no_show,
        }
    }
}

/// Where a reservation is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    PickedUp,
    NoShow,
}

impl ReservationStatus {
    /// Derives the status from the reservation flags.
    ///
    /// Both flags can be set independently; a no-show takes precedence.
    pub fn from_flags(is_picked_up: bool, is_no_show: bool) -> Self {
        match (is_picked_up, is_no_show) {
            (_, true) => Self::NoShow,
            (true, false) => Self::PickedUp,
            (false, false) => Self::Pending,
        }
    }
}

/// A reservation joined with the package it holds, as listed for a student.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationView {
    pub reservation_id: i32,
    pub package_id: i32,
    pub package_name: String,
    pub cafeteria: String,
    pub city: String,
    pub pickup_at: NaiveDateTime,
    pub reserved_at: NaiveDateTime,
    pub status: ReservationStatus,
}

/// Reasons a reservation attempt is refused.
///
/// Checks run in declaration order and the first failing check wins.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationRejection {
    #[error("Student not found")]
    StudentNotFound,
    #[error("Package not found")]
    PackageNotFound,
    #[error("This package has already been reserved")]
    AlreadyReserved,
    #[error("The pickup time for this package has passed")]
    PickupTimePassed,
    #[error("Reservations for this package are closed")]
    ReservationWindowClosed,
    #[error("You cannot reserve packages after two or more no-shows")]
    TooManyNoShows,
    #[error("You must be 18 or older to reserve this package")]
    AgeRestricted,
    #[error("You already have a reservation for this pickup date")]
    DuplicateDateReservation,
}

/// Result of a reservation attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReserveOutcome {
    Reserved(ReservationDto),
    Rejected(ReservationRejection),
}

impl ReserveOutcome {
    /// Returns true when the reservation was created.
    pub fn is_reserved(&self) -> bool {
        matches!(self, Self::Reserved(_))
    }

    /// Returns the rejection reason, if any.
    pub fn rejection(&self) -> Option<ReservationRejection> {
        match self {
            Self::Reserved(_) => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }

    /// User-facing message describing the outcome.
    pub fn message(&self) -> String {
        match self {
            Self::Reserved(_) => "Package reserved".to_string(),
            Self::Rejected(reason) => reason.to_string(),
        }
    }
}

/// Result of a pickup or no-show transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleOutcome {
    /// The flag changed
    Applied,
    /// The flag already had the requested value
    Unchanged,
    /// The package has no reservation
    NoReservation,
}

impl LifecycleOutcome {
    /// Every outcome is a success; failures are reported as errors.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Applied => "Reservation updated",
            Self::Unchanged => "Reservation already up to date",
            Self::NoReservation => "No reservation for this package",
        }
    }
}
