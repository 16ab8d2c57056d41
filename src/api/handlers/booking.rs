use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use crate::api::dtos::requests::{BookingQuoteQuery, CreateOrderRequest, UpdateBookingRequest, VerifyPaymentRequest};
use crate::api::dtos::responses::{BookingQuoteResponse, CreateOrderResponse, VerifyPaymentResponse};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::booking::{Booking, NewBookingParams};
use crate::domain::models::listing::Listing;
use crate::domain::models::order::{OrderNotes, OrderRequest};
use crate::domain::services::pricing::{resolve_nights, PricingPolicy};
use crate::domain::services::signature::verify_payment_signature;
use crate::error::AppError;
use crate::infra::gateway::razorpay::generate_receipt;
use crate::state::AppState;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, info, warn};

fn validate_stay(check_in: NaiveDate, check_out: NaiveDate, guests: i32) -> Result<(), AppError> {
    if check_out <= check_in {
        return Err(AppError::Validation("Check-out must be after check-in".into()));
    }
    if guests < 1 {
        return Err(AppError::Validation("At least one guest is required".into()));
    }
    Ok(())
}

async fn find_listing(state: &Arc<AppState>, id: &str) -> Result<Listing, AppError> {
    state.listing_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Listing not found".into()))
}

/// Quote for the booking-confirmation page. Nothing is persisted and no
/// gateway order exists yet.
pub async fn booking_page(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(listing_id): Path<String>,
    Query(params): Query<BookingQuoteQuery>,
) -> Result<impl IntoResponse, AppError> {
    let listing = find_listing(&state, &listing_id).await?;

    let guests = params.guests.unwrap_or(1);
    validate_stay(params.check_in, params.check_out, guests)?;
    let nights = resolve_nights(params.check_in, params.check_out, params.nights);

    let policy = PricingPolicy::from_config(&state.config);
    let total_price = policy.compute_total(listing.price, nights)?;

    Ok(Json(BookingQuoteResponse {
        listing,
        check_in: params.check_in,
        check_out: params.check_out,
        nights,
        guests,
        total_price,
        currency: state.config.currency.clone(),
    }))
}

pub async fn create_order(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(listing_id): Path<String>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let listing = find_listing(&state, &listing_id).await?;

    validate_stay(payload.check_in, payload.check_out, payload.guests)?;
    let nights = resolve_nights(payload.check_in, payload.check_out, payload.nights);

    let overlapping = state.booking_repo
        .count_overlap(&listing.id, payload.check_in, payload.check_out, None)
        .await?;
    if overlapping > 0 {
        return Err(AppError::Conflict("Listing is already booked for these dates".into()));
    }

    let policy = PricingPolicy::from_config(&state.config);
    let total_price = policy.compute_total(listing.price, nights)?;

    // Order first, booking second. A gateway failure aborts here with no
    // local record; a persist failure below leaves a gateway order we log
    // for manual reconciliation.
    let order_request = OrderRequest {
        amount: total_price * 100,
        currency: state.config.currency.clone(),
        receipt: generate_receipt(),
        notes: OrderNotes {
            listing_id: listing.id.clone(),
            listing_title: listing.title.clone(),
            user_id: user.id.clone(),
            nights,
            guests: payload.guests,
        },
    };
    let order = state.order_gateway.create_order(&order_request).await?;

    let booking = Booking::new(NewBookingParams {
        listing_id: listing.id.clone(),
        user_id: user.id.clone(),
        check_in: payload.check_in,
        check_out: payload.check_out,
        nights,
        guests: payload.guests,
        total_price,
        order_id: order.id.clone(),
    });

    let created = state.booking_repo.create(&booking).await.map_err(|e| {
        error!(
            "Booking persist failed after order {} was created; reconcile manually against the gateway: {:?}",
            order.id, e
        );
        e
    })?;

    info!("Created order {} for booking {} on listing {} ({} nights, total {})",
        order.id, created.id, listing.id, nights, total_price);

    Ok(Json(CreateOrderResponse {
        success: true,
        order_id: order.id,
        amount: order.amount,
        currency: order.currency,
        booking_id: created.id,
        key: state.config.razorpay_key_id.clone(),
        total_price,
    }))
}

/// The gateway callback. The HMAC check is the sole trust boundary between
/// "claimed payment" and "verified payment"; duplicate callbacks for an
/// already-completed booking return the same success without new writes.
pub async fn verify_payment(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(payload): Json<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&payload.booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    // The callback must reference the order this booking was created with.
    match booking.order_id.as_deref() {
        Some(order_id) if order_id == payload.razorpay_order_id => {}
        _ => {
            warn!("Callback order {} does not match booking {}", payload.razorpay_order_id, booking.id);
            return Err(AppError::Validation("Order does not belong to this booking".into()));
        }
    }

    let valid = verify_payment_signature(
        &payload.razorpay_order_id,
        &payload.razorpay_payment_id,
        &payload.razorpay_signature,
        &state.config.razorpay_key_secret,
    );

    if !valid {
        state.booking_repo.mark_payment_failed(&booking.id).await?;
        warn!("Signature mismatch for booking {} (order {})", booking.id, payload.razorpay_order_id);
        return Err(AppError::SignatureMismatch);
    }

    if booking.is_payment_completed() {
        info!("Duplicate payment callback for booking {}, already completed", booking.id);
        return Ok(Json(VerifyPaymentResponse {
            success: true,
            booking_id: booking.id,
            message: "Payment verified successfully".into(),
        }));
    }

    let transitioned = state.booking_repo
        .mark_payment_completed(&booking.id, &payload.razorpay_payment_id, &payload.razorpay_signature)
        .await?;

    if !transitioned {
        // Lost a race with an identical concurrent callback, or the booking
        // left the verifiable states (refunded) in the meantime.
        let current = state.booking_repo.find_by_id(&booking.id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;
        if !current.is_payment_completed() {
            return Err(AppError::Conflict("Booking is not awaiting payment".into()));
        }
    }

    info!("Payment verified for booking {} (payment {})", booking.id, payload.razorpay_payment_id);

    Ok(Json(VerifyPaymentResponse {
        success: true,
        booking_id: booking.id,
        message: "Payment verified successfully".into(),
    }))
}

pub async fn my_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_user(&user.id).await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.user_id != user.id {
        return Err(AppError::Forbidden("Not your booking".into()));
    }

    Ok(Json(booking))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.user_id != user.id {
        return Err(AppError::Forbidden("Not your booking".into()));
    }

    validate_stay(payload.check_in, payload.check_out, payload.guests)?;
    let nights = resolve_nights(payload.check_in, payload.check_out, payload.nights);

    let overlapping = state.booking_repo
        .count_overlap(&booking.listing_id, payload.check_in, payload.check_out, Some(&booking.id))
        .await?;
    if overlapping > 0 {
        return Err(AppError::Conflict("Listing is already booked for these dates".into()));
    }

    // Price comes from the current listing price, not the old booking.
    let listing = find_listing(&state, &booking.listing_id).await?;
    let policy = PricingPolicy::from_config(&state.config);
    let total_price = policy.compute_total(listing.price, nights)?;

    booking.check_in = payload.check_in;
    booking.check_out = payload.check_out;
    booking.nights = nights;
    booking.guests = payload.guests;
    booking.total_price = total_price;

    let updated = state.booking_repo.update(&booking).await?;
    info!("Booking updated: {} (new total {})", updated.id, updated.total_price);
    Ok(Json(updated))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.user_id != user.id {
        return Err(AppError::Forbidden("Not your booking".into()));
    }

    if booking.is_payment_completed() {
        return Err(AppError::Conflict("Paid bookings must be refunded before cancellation".into()));
    }

    // Cancellation is a hard delete; no tombstone is kept.
    state.booking_repo.delete(&booking.id).await?;
    info!("Booking cancelled: {}", booking.id);
    Ok(Json(serde_json::json!({"status": "cancelled", "booking_id": booking.id})))
}
