mod get_student_reservations;

use chrono::Duration;
use mealbox_test_utils::prelude::*;

use crate::server::{service::reservation::ReservationService, util::time::FixedClock};
