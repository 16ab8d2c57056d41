use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info, warn};
use crate::state::AppState;

const SWEEP_INTERVAL_SECS: u64 = 600;
const STALE_AFTER_HOURS: i64 = 24;

/// Periodically surfaces bookings that never received a payment callback.
/// No local state is touched; the gateway order may have been paid, expired
/// or abandoned, and only manual reconciliation can tell which.
pub async fn start_reconciliation_worker(state: Arc<AppState>) {
    info!("Starting payment reconciliation worker...");

    loop {
        let cutoff = Utc::now() - chrono::Duration::hours(STALE_AFTER_HOURS);
        match state.booking_repo.find_stale_pending(cutoff).await {
            Ok(stale) => {
                for booking in &stale {
                    warn!(
                        "Booking {} still pending since {} (order {:?}); reconcile against the gateway",
                        booking.id, booking.created_at, booking.order_id
                    );
                }
                if !stale.is_empty() {
                    info!("Reconciliation sweep found {} stale pending bookings", stale.len());
                }
            }
            Err(e) => error!("Failed to fetch stale pending bookings: {:?}", e),
        }
        sleep(Duration::from_secs(SWEEP_INTERVAL_SECS)).await;
    }
}
