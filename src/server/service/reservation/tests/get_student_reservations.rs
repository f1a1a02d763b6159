use crate::model::reservation::ReservationStatus;

use super::*;

/// Expect an empty list for an unknown identity
#[tokio::test]
async fn returns_empty_for_unknown_student() -> Result<(), TestError> {
    let test = test_setup_with_reservation_tables!()?;

    let clock = FixedClock::new(test_now());
    let reservation_service = ReservationService::new(&test.db, &clock);
    let result = reservation_service.get_student_reservations("nobody").await;

    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());

    Ok(())
}

/// Expect only the student's reservations, ordered by pickup time with their status
#[tokio::test]
async fn lists_reservations_by_pickup_time() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_reservation_tables()
        .with_student(1001, date(2000, 1, 1))
        .with_student(1002, date(2000, 1, 1))
        .build()
        .await?;
    let now = test_now();
    let upcoming = test
        .package()
        .insert_mock_package(now + Duration::days(1), now + Duration::hours(20))
        .await?;
    let collected = test
        .package()
        .insert_mock_package(now - Duration::days(2), now - Duration::days(3))
        .await?;
    let missed = test
        .package()
        .insert_mock_package(now - Duration::days(1), now - Duration::days(2))
        .await?;
    let other = test
        .package()
        .insert_mock_package(now + Duration::days(2), now + Duration::days(1))
        .await?;

    test.reservation()
        .insert_reservation(upcoming.id, 1001)
        .await?;
    test.reservation()
        .insert_reservation_with_flags(collected.id, 1001, true, false)
        .await?;
    test.reservation()
        .insert_reservation_with_flags(missed.id, 1001, false, true)
        .await?;
    test.reservation().insert_reservation(other.id, 1002).await?;

    let clock = FixedClock::new(now);
    let reservation_service = ReservationService::new(&test.db, &clock);
    let views = reservation_service
        .get_student_reservations(&factory::identity_for(1001))
        .await
        .unwrap();

    let summary: Vec<(i32, ReservationStatus)> =
        views.iter().map(|v| (v.package_id, v.status)).collect();
    assert_eq!(
        summary,
        vec![
            (collected.id, ReservationStatus::PickedUp),
            (missed.id, ReservationStatus::NoShow),
            (upcoming.id, ReservationStatus::Pending),
        ]
    );
    assert_eq!(views[0].cafeteria, TEST_CAFETERIA);

    Ok(())
}
