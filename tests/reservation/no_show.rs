use chrono::Duration;
use mealbox::{
    model::{
        package::{BlockReason, PackageFilter},
        reservation::{LifecycleOutcome, ReservationRejection},
    },
    server::{
        service::{
            availability::AvailabilityService, no_show::NoShowService,
            reservation::ReservationService,
        },
        util::time::FixedClock,
    },
};
use mealbox_test_utils::prelude::*;

/// Expect a student with one no-show to reserve, and to be blocked after a second no-show
#[tokio::test]
async fn second_no_show_blocks_reservations() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_reservation_tables()
        .with_student_no_shows(1001, date(2000, 1, 1), 1)
        .build()
        .await?;
    let now = test_now();
    let first = test
        .package()
        .insert_mock_package(now + Duration::hours(5), now + Duration::hours(3))
        .await?;
    let second = test
        .package()
        .insert_mock_package(now + Duration::days(2), now + Duration::days(1))
        .await?;
    let identity = factory::identity_for(1001);

    let clock = FixedClock::new(now);
    let reservation_service = ReservationService::new(&test.db, &clock);

    let outcome = reservation_service.reserve(first.id, &identity).await.unwrap();
    assert!(outcome.is_reserved());

    let marked = reservation_service.mark_no_show(first.id).await.unwrap();
    assert_eq!(marked, LifecycleOutcome::Applied);

    let no_show_service = NoShowService::new(&test.db);
    assert_eq!(no_show_service.get_no_show_count(&identity).await.unwrap(), 2);
    assert!(!no_show_service.can_reserve(&identity).await.unwrap());

    let outcome = reservation_service.reserve(second.id, &identity).await.unwrap();
    assert_eq!(
        outcome.rejection(),
        Some(ReservationRejection::TooManyNoShows)
    );

    Ok(())
}

/// Expect undoing a no-show to restore the ability to reserve
#[tokio::test]
async fn undo_restores_reservation_rights() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_reservation_tables()
        .with_student_no_shows(1001, date(2000, 1, 1), 1)
        .build()
        .await?;
    let now = test_now();
    let missed = test
        .package()
        .insert_mock_package(now - Duration::hours(2), now - Duration::hours(3))
        .await?;
    // A different day than the missed package, so the duplicate-date rule does not apply
    let upcoming = test
        .package()
        .insert_mock_package(now + Duration::days(1), now + Duration::hours(20))
        .await?;
    test.reservation()
        .insert_reservation(missed.id, 1001)
        .await?;
    let identity = factory::identity_for(1001);

    let clock = FixedClock::new(now);
    let reservation_service = ReservationService::new(&test.db, &clock);
    let availability_service = AvailabilityService::new(&test.db, &clock);

    reservation_service.mark_no_show(missed.id).await.unwrap();
    let blocked = availability_service
        .get_available_packages(&identity, &PackageFilter::default())
        .await
        .unwrap();
    assert_eq!(blocked.len(), 1);
    assert!(!blocked[0].can_reserve);
    assert_eq!(blocked[0].block_reason, Some(BlockReason::TooManyNoShows));

    let undone = reservation_service.undo_no_show(missed.id).await.unwrap();
    assert_eq!(undone, LifecycleOutcome::Applied);

    let open = availability_service
        .get_available_packages(&identity, &PackageFilter::default())
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
    assert!(open[0].can_reserve);
    assert_eq!(open[0].block_reason, None);

    let outcome = reservation_service
        .reserve(upcoming.id, &identity)
        .await
        .unwrap();
    assert!(outcome.is_reserved());

    Ok(())
}
