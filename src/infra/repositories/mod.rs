pub mod sqlite_booking_repo;
pub mod sqlite_listing_repo;
pub mod postgres_booking_repo;
pub mod postgres_listing_repo;
