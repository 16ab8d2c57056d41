use crate::domain::models::{
    booking::Booking,
    listing::Listing,
    order::{GatewayOrder, OrderRequest},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn create(&self, listing: &Listing) -> Result<Listing, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Listing>, AppError>;
    async fn list(&self) -> Result<Vec<Listing>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn update(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    /// Active bookings intersecting [check_in, check_out) on a listing,
    /// optionally ignoring one booking (used when rescheduling it).
    async fn count_overlap(&self, listing_id: &str, check_in: NaiveDate, check_out: NaiveDate, exclude_booking_id: Option<&str>) -> Result<i64, AppError>;
    /// Conditional transition to `completed` from `pending` or `failed`.
    /// Returns false when the row was in neither state, which callers treat
    /// as "already applied".
    async fn mark_payment_completed(&self, id: &str, payment_id: &str, signature: &str) -> Result<bool, AppError>;
    /// Marks the payment failed unless it already completed. A completed
    /// payment is only ever overwritten by the external refund path.
    async fn mark_payment_failed(&self, id: &str) -> Result<(), AppError>;
    async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> Result<Vec<Booking>, AppError>;
}

#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn create_order(&self, request: &OrderRequest) -> Result<GatewayOrder, AppError>;
}
