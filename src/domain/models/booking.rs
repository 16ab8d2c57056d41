use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

pub mod payment_status {
    pub const PENDING: &str = "pending";
    pub const COMPLETED: &str = "completed";
    pub const FAILED: &str = "failed";
    pub const REFUNDED: &str = "refunded";
}

pub mod booking_status {
    pub const CONFIRMED: &str = "confirmed";
    pub const CANCELLED: &str = "cancelled";
    pub const COMPLETED: &str = "completed";
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub listing_id: String,
    pub user_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i32,
    pub guests: i32,
    pub total_price: i64,
    pub payment_status: String,
    pub payment_id: Option<String>,
    pub order_id: Option<String>,
    pub gateway_signature: Option<String>,
    pub booking_status: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub listing_id: String,
    pub user_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i32,
    pub guests: i32,
    pub total_price: i64,
    pub order_id: String,
}

impl Booking {
    /// A booking starts life pending payment but already confirmed as a
    /// reservation. The order exists at the gateway before this record does.
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            listing_id: params.listing_id,
            user_id: params.user_id,
            check_in: params.check_in,
            check_out: params.check_out,
            nights: params.nights,
            guests: params.guests,
            total_price: params.total_price,
            payment_status: payment_status::PENDING.to_string(),
            payment_id: None,
            order_id: Some(params.order_id),
            gateway_signature: None,
            booking_status: booking_status::CONFIRMED.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_payment_completed(&self) -> bool {
        self.payment_status == payment_status::COMPLETED
    }
}
