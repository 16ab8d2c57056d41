use crate::domain::models::booking::{payment_status, Booking};
use crate::domain::ports::BookingRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Row, SqlitePool};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, listing_id, user_id, check_in, check_out, nights, guests, total_price, payment_status, payment_id, order_id, gateway_signature, booking_status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.listing_id).bind(&booking.user_id)
            .bind(booking.check_in).bind(booking.check_out).bind(booking.nights).bind(booking.guests)
            .bind(booking.total_price).bind(&booking.payment_status).bind(&booking.payment_id)
            .bind(&booking.order_id).bind(&booking.gateway_signature).bind(&booking.booking_status)
            .bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_id = ? ORDER BY created_at DESC").bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET check_in=?, check_out=?, nights=?, guests=?, total_price=?
             WHERE id=?
             RETURNING *"
        )
            .bind(booking.check_in).bind(booking.check_out).bind(booking.nights).bind(booking.guests)
            .bind(booking.total_price).bind(&booking.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Booking not found".into())); }
        Ok(())
    }
    async fn count_overlap(&self, listing_id: &str, check_in: NaiveDate, check_out: NaiveDate, exclude_booking_id: Option<&str>) -> Result<i64, AppError> {
        let result = sqlx::query(
            "SELECT COUNT(*) as count FROM bookings
             WHERE listing_id = ? AND check_in < ? AND check_out > ? AND payment_status != 'failed' AND id != ?"
        )
            .bind(listing_id).bind(check_out).bind(check_in).bind(exclude_booking_id.unwrap_or(""))
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }
    async fn mark_payment_completed(&self, id: &str, payment_id: &str, signature: &str) -> Result<bool, AppError> {
        // Guard admits pending and failed rows; completed/refunded stay as-is
        // so duplicate callbacks cannot reapply the transition.
        let result = sqlx::query(
            "UPDATE bookings SET payment_status = ?, payment_id = ?, gateway_signature = ?
             WHERE id = ? AND payment_status IN (?, ?)"
        )
            .bind(payment_status::COMPLETED).bind(payment_id).bind(signature)
            .bind(id).bind(payment_status::PENDING).bind(payment_status::FAILED)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() == 1)
    }
    async fn mark_payment_failed(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE bookings SET payment_status = ? WHERE id = ? AND payment_status != ?")
            .bind(payment_status::FAILED).bind(id).bind(payment_status::COMPLETED)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
    async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE payment_status = 'pending' AND created_at < ?")
            .bind(cutoff)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
