use crate::domain::models::listing::Listing;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order_id: String,
    /// Minor currency units, as the payment widget expects.
    pub amount: i64,
    pub currency: String,
    pub booking_id: String,
    /// Public key id for the client-side widget. Never the secret.
    pub key: String,
    pub total_price: i64,
}

#[derive(Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub booking_id: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct BookingQuoteResponse {
    pub listing: Listing,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i32,
    pub guests: i32,
    pub total_price: i64,
    pub currency: String,
}
