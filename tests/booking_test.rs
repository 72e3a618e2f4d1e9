mod common;

use common::{
    booking, future_date, memory_pool, product_stock, seed_directory, BARBER, CLIENT,
    EMPTY_PRODUCT, OTHER_CLIENT, PRODUCT, SERVICE,
};
use fadebook::{appointments, availability, error::ApiError, models::Status};

#[tokio::test]
async fn booking_a_free_slot_returns_the_joined_appointment() {
    let pool = memory_pool().await;
    seed_directory(&pool).await;
    let date = future_date();

    let mut req = booking(CLIENT, BARBER, &date, "10:00");
    req.notes = Some("primera visita".to_string());
    let appt = availability::create_appointment(&pool, req).await.unwrap();

    assert_eq!(appt.status, Status::Pending);
    assert_eq!(appt.client_name, "Carla Soto");
    assert_eq!(appt.barber_name, "Rodrigo Vega");
    assert_eq!(appt.service_name, "Signature Cut");
    assert_eq!(appt.notes.as_deref(), Some("primera visita"));

    assert!(!availability::is_available(&pool, BARBER, &date, "10:00")
        .await
        .unwrap());
}

#[tokio::test]
async fn double_booking_the_same_slot_fails() {
    let pool = memory_pool().await;
    seed_directory(&pool).await;
    let date = future_date();

    availability::create_appointment(&pool, booking(CLIENT, BARBER, &date, "10:00"))
        .await
        .unwrap();

    let err = availability::create_appointment(&pool, booking(OTHER_CLIENT, BARBER, &date, "10:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::SlotUnavailable));
}

#[tokio::test]
async fn seconds_qualified_time_is_the_same_slot() {
    let pool = memory_pool().await;
    seed_directory(&pool).await;
    let date = future_date();

    availability::create_appointment(&pool, booking(CLIENT, BARBER, &date, "10:00"))
        .await
        .unwrap();

    // One minute, one slot, regardless of spelling.
    let err = availability::create_appointment(
        &pool,
        booking(OTHER_CLIENT, BARBER, &date, "10:00:00"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::SlotUnavailable));

    assert!(!availability::is_available(&pool, BARBER, &date, "10:00:00")
        .await
        .unwrap());

    let active = sqlx::query_scalar::<_, i64>(
        r#"SELECT COUNT(*) FROM appointments
           WHERE barber_id = ? AND date = ? AND time = ?
             AND status NOT IN ('cancelled', 'completed')"#,
    )
    .bind(BARBER)
    .bind(&date)
    .bind("10:00")
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(active, 1);
}

#[tokio::test]
async fn seconds_qualified_booking_is_stored_canonically() {
    let pool = memory_pool().await;
    seed_directory(&pool).await;
    let date = future_date();

    let appt = availability::create_appointment(&pool, booking(CLIENT, BARBER, &date, "10:00:00"))
        .await
        .unwrap();
    assert_eq!(appt.time, "10:00");

    let err = availability::create_appointment(&pool, booking(OTHER_CLIENT, BARBER, &date, "10:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::SlotUnavailable));
}

#[tokio::test]
async fn inactive_barbers_are_not_bookable() {
    let pool = memory_pool().await;
    seed_directory(&pool).await;
    let date = future_date();

    let err = availability::create_appointment(
        &pool,
        booking(CLIENT, common::INACTIVE_BARBER, &date, "10:00"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidReference { kind: "barber", .. }));
    assert!(appointments::list_all(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn booking_a_past_slot_fails() {
    let pool = memory_pool().await;
    seed_directory(&pool).await;

    let err = availability::create_appointment(&pool, booking(CLIENT, BARBER, "2000-01-01", "10:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::SlotUnavailable));
}

#[tokio::test]
async fn cancelling_frees_the_slot_for_rebooking() {
    let pool = memory_pool().await;
    seed_directory(&pool).await;
    let date = future_date();

    let appt = availability::create_appointment(&pool, booking(CLIENT, BARBER, &date, "10:00"))
        .await
        .unwrap();

    let cancelled = appointments::cancel(&pool, &appt.id).await.unwrap();
    assert_eq!(cancelled.status, Status::Cancelled);
    assert!(availability::is_available(&pool, BARBER, &date, "10:00")
        .await
        .unwrap());

    // A different client can now take the identical slot.
    availability::create_appointment(&pool, booking(OTHER_CLIENT, BARBER, &date, "10:00"))
        .await
        .unwrap();
}

#[tokio::test]
async fn completed_appointments_also_free_the_slot() {
    let pool = memory_pool().await;
    seed_directory(&pool).await;
    let date = future_date();

    let appt = availability::create_appointment(&pool, booking(CLIENT, BARBER, &date, "10:00"))
        .await
        .unwrap();
    appointments::update_status(&pool, &appt.id, Some(Status::Completed), None)
        .await
        .unwrap();

    assert!(availability::is_available(&pool, BARBER, &date, "10:00")
        .await
        .unwrap());
}

#[tokio::test]
async fn unique_index_rejects_a_second_active_row_directly() {
    let pool = memory_pool().await;
    seed_directory(&pool).await;
    let date = future_date();

    availability::create_appointment(&pool, booking(CLIENT, BARBER, &date, "10:00"))
        .await
        .unwrap();

    // Bypass the availability pre-check entirely: the storage-level
    // index must still hold the invariant.
    let err = appointments::insert(
        &pool,
        "forced-id",
        OTHER_CLIENT,
        BARBER,
        SERVICE,
        &date,
        "10:00",
        Status::Pending,
        None,
        "2024-01-01T00:00:00Z",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::SlotUnavailable));
}

#[tokio::test]
async fn unknown_references_are_rejected_before_any_write() {
    let pool = memory_pool().await;
    seed_directory(&pool).await;
    let date = future_date();

    let err = availability::create_appointment(&pool, booking("ghost", BARBER, &date, "10:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidReference { kind: "client", .. }));

    let err = availability::create_appointment(&pool, booking(CLIENT, "ghost", &date, "10:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidReference { kind: "barber", .. }));

    let mut req = booking(CLIENT, BARBER, &date, "10:00");
    req.service_id = "ghost".to_string();
    let err = availability::create_appointment(&pool, req).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidReference { kind: "service", .. }));

    assert!(appointments::list_all(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn attached_products_decrement_stock_once_each() {
    let pool = memory_pool().await;
    seed_directory(&pool).await;
    let date = future_date();

    let mut req = booking(CLIENT, BARBER, &date, "10:00");
    req.product_ids = vec![PRODUCT.to_string(), PRODUCT.to_string()];
    availability::create_appointment(&pool, req).await.unwrap();

    assert_eq!(product_stock(&pool, PRODUCT).await, 1);
}

#[tokio::test]
async fn stock_failure_does_not_fail_the_booking() {
    let pool = memory_pool().await;
    seed_directory(&pool).await;
    let date = future_date();

    let mut req = booking(CLIENT, BARBER, &date, "10:00");
    req.product_ids = vec![
        EMPTY_PRODUCT.to_string(),
        "no-such-product".to_string(),
        PRODUCT.to_string(),
    ];
    let appt = availability::create_appointment(&pool, req).await.unwrap();

    // The booking stands; the exhausted product never goes negative
    // and the good one still decrements.
    assert_eq!(appt.status, Status::Pending);
    assert_eq!(product_stock(&pool, EMPTY_PRODUCT).await, 0);
    assert_eq!(product_stock(&pool, PRODUCT).await, 2);
}

#[tokio::test]
async fn update_and_cancel_of_unknown_ids_return_not_found() {
    let pool = memory_pool().await;
    seed_directory(&pool).await;

    let err = appointments::update_status(&pool, "ghost", Some(Status::Confirmed), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound("appointment")));

    let err = appointments::cancel(&pool, "ghost").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound("appointment")));
}

#[tokio::test]
async fn lists_are_ordered_most_recent_slot_first() {
    let pool = memory_pool().await;
    seed_directory(&pool).await;
    let date = future_date();

    for time in ["09:00", "11:00", "10:00"] {
        availability::create_appointment(&pool, booking(CLIENT, BARBER, &date, time))
            .await
            .unwrap();
    }

    let listed = appointments::list_by_barber(&pool, BARBER).await.unwrap();
    let times: Vec<&str> = listed.iter().map(|a| a.time.as_str()).collect();
    assert_eq!(times, vec!["11:00", "10:00", "09:00"]);

    let by_client = appointments::list_by_client(&pool, CLIENT).await.unwrap();
    assert_eq!(by_client.len(), 3);
}

#[tokio::test]
async fn caller_supplied_initial_status_is_honoured() {
    let pool = memory_pool().await;
    seed_directory(&pool).await;
    let date = future_date();

    let mut req = booking(CLIENT, BARBER, &date, "10:00");
    req.status = Some(Status::Confirmed);
    let appt = availability::create_appointment(&pool, req).await.unwrap();
    assert_eq!(appt.status, Status::Confirmed);
}
