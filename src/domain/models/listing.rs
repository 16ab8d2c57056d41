use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Listings are owned by the marketplace CRUD side of the application.
/// The booking core reads them for the nightly price and display fields.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Listing {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub location: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn new(owner_id: String, title: String, location: String, price: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            title,
            location,
            price,
            created_at: Utc::now(),
        }
    }
}
