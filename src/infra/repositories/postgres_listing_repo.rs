use crate::domain::models::listing::Listing;
use crate::domain::ports::ListingRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresListingRepo {
    pool: PgPool,
}

impl PostgresListingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for PostgresListingRepo {
    async fn create(&self, listing: &Listing) -> Result<Listing, AppError> {
        sqlx::query_as::<_, Listing>("INSERT INTO listings (id, owner_id, title, location, price, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *")
            .bind(&listing.id).bind(&listing.owner_id).bind(&listing.title)
            .bind(&listing.location).bind(listing.price).bind(listing.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Listing>, AppError> {
        sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Listing>, AppError> {
        sqlx::query_as::<_, Listing>("SELECT * FROM listings ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
