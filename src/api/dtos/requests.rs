use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateListingRequest {
    pub title: String,
    pub location: String,
    pub price: i64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookingQuoteQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: Option<i32>,
    pub guests: Option<i32>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateOrderRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: Option<i32>,
    pub guests: i32,
}

/// Callback body as the gateway posts it back through the client.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    pub booking_id: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateBookingRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub nights: Option<i32>,
}
