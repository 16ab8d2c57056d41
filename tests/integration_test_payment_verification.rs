mod common;

use axum::http::StatusCode;
use common::TestApp;
use rental_backend::domain::services::signature::sign_payload;

const SECRET: &str = "test_key_secret";

async fn setup_pending_booking(app: &TestApp) -> (String, String) {
    let listing_id = app.create_listing("owner-1", "Beach Villa", 2000).await;
    let (status, body) = app.create_order("guest-1", &listing_id, "2026-03-01", "2026-03-04", 2).await;
    assert_eq!(status, StatusCode::OK);
    (
        body["order_id"].as_str().unwrap().to_string(),
        body["booking_id"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn test_verify_payment_success() {
    let app = TestApp::new().await;
    let (order_id, booking_id) = setup_pending_booking(&app).await;

    let signature = sign_payload(&order_id, "pay_123", SECRET);
    let (status, body) = app.verify_payment("guest-1", &order_id, "pay_123", &signature, &booking_id).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["booking_id"], booking_id);

    let bookings = app.get_my_bookings("guest-1").await;
    assert_eq!(bookings[0]["payment_status"], "completed");
    assert_eq!(bookings[0]["booking_status"], "confirmed");
    assert_eq!(bookings[0]["payment_id"], "pay_123");
    assert_eq!(bookings[0]["gateway_signature"], signature.as_str());
}

#[tokio::test]
async fn test_forged_signature_marks_failed_then_legitimate_retry_succeeds() {
    let app = TestApp::new().await;
    let (order_id, booking_id) = setup_pending_booking(&app).await;

    let forged = "0".repeat(64);
    let (status, _) = app.verify_payment("guest-1", &order_id, "pay_123", &forged, &booking_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The record survives the failure so payment can be retried.
    let bookings = app.get_my_bookings("guest-1").await;
    assert_eq!(bookings[0]["payment_status"], "failed");

    let signature = sign_payload(&order_id, "pay_123", SECRET);
    let (status, _) = app.verify_payment("guest-1", &order_id, "pay_123", &signature, &booking_id).await;
    assert_eq!(status, StatusCode::OK);

    let bookings = app.get_my_bookings("guest-1").await;
    assert_eq!(bookings[0]["payment_status"], "completed");
}

#[tokio::test]
async fn test_verify_payment_is_idempotent() {
    let app = TestApp::new().await;
    let (order_id, booking_id) = setup_pending_booking(&app).await;
    let calls_after_order = app.gateway.call_count();

    let signature = sign_payload(&order_id, "pay_777", SECRET);
    let (first, body_first) = app.verify_payment("guest-1", &order_id, "pay_777", &signature, &booking_id).await;
    let (second, body_second) = app.verify_payment("guest-1", &order_id, "pay_777", &signature, &booking_id).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(body_first["booking_id"], body_second["booking_id"]);
    assert_eq!(body_first["success"], body_second["success"]);

    // One effective transition and no extra gateway traffic.
    let bookings = app.get_my_bookings("guest-1").await;
    assert_eq!(bookings[0]["payment_status"], "completed");
    assert_eq!(bookings[0]["payment_id"], "pay_777");
    assert_eq!(app.gateway.call_count(), calls_after_order);
}

#[tokio::test]
async fn test_verify_unknown_booking() {
    let app = TestApp::new().await;

    let signature = sign_payload("order_x", "pay_x", SECRET);
    let (status, _) = app.verify_payment("guest-1", "order_x", "pay_x", &signature, "no-such-booking").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_callback_for_foreign_order_rejected() {
    let app = TestApp::new().await;
    let (_, booking_id) = setup_pending_booking(&app).await;

    // Valid signature, but over an order this booking never issued.
    let signature = sign_payload("order_other", "pay_123", SECRET);
    let (status, _) = app.verify_payment("guest-1", "order_other", "pay_123", &signature, &booking_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let bookings = app.get_my_bookings("guest-1").await;
    assert_eq!(bookings[0]["payment_status"], "pending");
}

#[tokio::test]
async fn test_completed_payment_not_downgraded_by_forged_callback() {
    let app = TestApp::new().await;
    let (order_id, booking_id) = setup_pending_booking(&app).await;

    let signature = sign_payload(&order_id, "pay_123", SECRET);
    let (status, _) = app.verify_payment("guest-1", &order_id, "pay_123", &signature, &booking_id).await;
    assert_eq!(status, StatusCode::OK);

    let forged = "f".repeat(64);
    let (status, _) = app.verify_payment("guest-1", &order_id, "pay_123", &forged, &booking_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let bookings = app.get_my_bookings("guest-1").await;
    assert_eq!(bookings[0]["payment_status"], "completed");
    assert_eq!(bookings[0]["payment_id"], "pay_123");
}
