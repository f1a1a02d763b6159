use chrono::Duration;
use futures::future::join_all;
use mealbox::{
    model::reservation::{ReservationRejection, ReserveOutcome},
    server::{service::reservation::ReservationService, util::time::FixedClock},
};
use mealbox_test_utils::prelude::*;

/// Expect exactly one of two simultaneous requests for the same package to succeed
#[tokio::test]
async fn two_students_race_for_one_package() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_reservation_tables()
        .with_student(1001, date(2000, 1, 1))
        .with_student(1002, date(2000, 1, 1))
        .build()
        .await?;
    let now = test_now();
    let package = test
        .package()
        .insert_mock_package(now + Duration::hours(5), now + Duration::hours(3))
        .await?;

    let clock = FixedClock::new(now);
    let reservation_service = ReservationService::new(&test.db, &clock);
    let first_identity = factory::identity_for(1001);
    let second_identity = factory::identity_for(1002);

    let (first, second) = tokio::join!(
        reservation_service.reserve(package.id, &first_identity),
        reservation_service.reserve(package.id, &second_identity),
    );

    let outcomes = [first.unwrap(), second.unwrap()];
    let reserved = outcomes.iter().filter(|o| o.is_reserved()).count();
    let already_reserved = outcomes
        .iter()
        .filter(|o| o.rejection() == Some(ReservationRejection::AlreadyReserved))
        .count();

    assert_eq!(reserved, 1);
    assert_eq!(already_reserved, 1);
    assert_eq!(test.reservation().count().await?, 1);

    Ok(())
}

/// Expect a single reservation when many students request the same package at once
#[tokio::test]
async fn many_students_race_for_one_package() -> Result<(), TestError> {
    let student_numbers: Vec<i32> = (2001..=2008).collect();

    let mut builder = TestBuilder::new().with_reservation_tables();
    for student_number in &student_numbers {
        builder = builder.with_student(*student_number, date(2000, 1, 1));
    }
    let test = builder.build().await?;
    let now = test_now();
    let package = test
        .package()
        .insert_mock_package(now + Duration::hours(5), now + Duration::hours(3))
        .await?;

    let clock = FixedClock::new(now);
    let reservation_service = ReservationService::new(&test.db, &clock);
    let identities: Vec<String> = student_numbers
        .iter()
        .map(|n| factory::identity_for(*n))
        .collect();

    let outcomes = join_all(
        identities
            .iter()
            .map(|identity| reservation_service.reserve(package.id, identity)),
    )
    .await;

    let mut winners = Vec::new();
    for outcome in outcomes {
        match outcome.unwrap() {
            ReserveOutcome::Reserved(reservation) => winners.push(reservation.student_number),
            ReserveOutcome::Rejected(reason) => {
                assert_eq!(reason, ReservationRejection::AlreadyReserved)
            }
        }
    }

    assert_eq!(winners.len(), 1);
    assert!(student_numbers.contains(&winners[0]));
    assert_eq!(test.reservation().count().await?, 1);

    Ok(())
}
