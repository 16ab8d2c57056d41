use rental_backend::{
    api::router::create_router,
    config::Config,
    domain::models::auth::Claims,
    domain::models::order::{GatewayOrder, OrderRequest},
    domain::ports::OrderGateway,
    error::AppError,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_listing_repo::SqliteListingRepo,
    },
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

/// Stands in for the external payment provider. Counts calls so tests can
/// assert that failed validation never reaches the gateway.
pub struct MockOrderGateway {
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
}

impl MockOrderGateway {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrderGateway for MockOrderGateway {
    async fn create_order(&self, request: &OrderRequest) -> Result<GatewayOrder, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Gateway("mock gateway unavailable".into()));
        }
        Ok(GatewayOrder {
            id: format!("order_{}", Uuid::new_v4().simple()),
            amount: request.amount,
            currency: request.currency.clone(),
        })
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub gateway: Arc<MockOrderGateway>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_policy("tax_inclusive").await
    }

    pub async fn with_policy(pricing_policy: &str) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-jwt-secret".to_string(),
            razorpay_key_id: "rzp_test_key".to_string(),
            razorpay_key_secret: "test_key_secret".to_string(),
            razorpay_api_url: "http://localhost".to_string(),
            currency: "INR".to_string(),
            pricing_policy: pricing_policy.to_string(),
            tax_rate: 0.18,
            service_fee: 200,
            gateway_timeout_secs: 10,
        };

        let gateway = Arc::new(MockOrderGateway::new());

        let state = Arc::new(AppState {
            config: config.clone(),
            listing_repo: Arc::new(SqliteListingRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            order_gateway: gateway.clone(),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            gateway,
        }
    }

    /// Cookie for a caller the external identity provider vouches for.
    pub fn auth_cookie(&self, user_id: &str) -> String {
        let token = Claims::new(user_id, user_id, 3600)
            .into_token(&self.state.config.jwt_secret)
            .expect("Failed to mint test token");
        format!("access_token={}", token)
    }

    pub async fn create_listing(&self, owner_id: &str, title: &str, price: i64) -> String {
        let res = self.router.clone().oneshot(
            Request::builder().method("POST").uri("/api/v1/listings")
                .header(header::COOKIE, self.auth_cookie(owner_id))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({
                    "title": title, "location": "Goa", "price": price
                }).to_string())).unwrap()
        ).await.unwrap();

        assert!(res.status().is_success(), "listing creation failed: {}", res.status());
        let body = parse_body(res).await;
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_order(
        &self,
        user_id: &str,
        listing_id: &str,
        check_in: &str,
        check_out: &str,
        guests: i32,
    ) -> (axum::http::StatusCode, Value) {
        let res = self.router.clone().oneshot(
            Request::builder().method("POST")
                .uri(format!("/api/v1/listings/{}/create-order", listing_id))
                .header(header::COOKIE, self.auth_cookie(user_id))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({
                    "check_in": check_in, "check_out": check_out, "guests": guests
                }).to_string())).unwrap()
        ).await.unwrap();

        let status = res.status();
        let body = parse_body(res).await;
        (status, body)
    }

    pub async fn verify_payment(
        &self,
        user_id: &str,
        order_id: &str,
        payment_id: &str,
        signature: &str,
        booking_id: &str,
    ) -> (axum::http::StatusCode, Value) {
        let res = self.router.clone().oneshot(
            Request::builder().method("POST").uri("/api/v1/bookings/verify-payment")
                .header(header::COOKIE, self.auth_cookie(user_id))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({
                    "razorpay_order_id": order_id,
                    "razorpay_payment_id": payment_id,
                    "razorpay_signature": signature,
                    "booking_id": booking_id
                }).to_string())).unwrap()
        ).await.unwrap();

        let status = res.status();
        let body = parse_body(res).await;
        (status, body)
    }

    pub async fn get_my_bookings(&self, user_id: &str) -> Value {
        let res = self.router.clone().oneshot(
            Request::builder().method("GET").uri("/api/v1/bookings")
                .header(header::COOKIE, self.auth_cookie(user_id))
                .body(Body::empty()).unwrap()
        ).await.unwrap();
        assert!(res.status().is_success());
        parse_body(res).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}
