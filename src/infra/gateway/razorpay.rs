use crate::config::Config;
use crate::domain::models::order::{GatewayOrder, OrderRequest};
use crate::domain::ports::OrderGateway;
use crate::error::AppError;
use async_trait::async_trait;
use rand::{distributions::Alphanumeric, Rng};
use reqwest::Client;
use std::time::Duration;
use tracing::error;

pub struct RazorpayOrderGateway {
    client: Client,
    api_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayOrderGateway {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.gateway_timeout_secs))
            .build()
            .expect("Failed to build gateway HTTP client");

        Self {
            client,
            api_url: config.razorpay_api_url.clone(),
            key_id: config.razorpay_key_id.clone(),
            key_secret: config.razorpay_key_secret.clone(),
        }
    }
}

/// Unique per call so gateway-side idempotency never collides across
/// concurrent order requests.
pub fn generate_receipt() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("rcpt_{}_{}", chrono::Utc::now().timestamp_millis(), suffix)
}

#[async_trait]
impl OrderGateway for RazorpayOrderGateway {
    async fn create_order(&self, request: &OrderRequest) -> Result<GatewayOrder, AppError> {
        let res = self.client
            .post(format!("{}/v1/orders", self.api_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry no secret material, ids only
                error!("Order creation request failed (receipt {}): {}", request.receipt, e);
                AppError::Gateway(format!("Order creation failed: {}", e))
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            error!("Order creation rejected (receipt {}). Status: {}, Body: {}", request.receipt, status, body);
            return Err(AppError::Gateway(format!("Order creation rejected with status {}", status)));
        }

        res.json::<GatewayOrder>().await.map_err(|e| {
            error!("Order response parse error (receipt {}): {}", request.receipt, e);
            AppError::Gateway(format!("Malformed order response: {}", e))
        })
    }
}
