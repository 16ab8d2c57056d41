use std::sync::Arc;
use crate::domain::ports::{BookingRepository, ListingRepository, OrderGateway};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub listing_repo: Arc<dyn ListingRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub order_gateway: Arc<dyn OrderGateway>,
}
