use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub razorpay_key_id: String,
    pub razorpay_key_secret: String,
    pub razorpay_api_url: String,
    pub currency: String,
    pub pricing_policy: String, // "tax_inclusive" or "flat_fee"
    pub tax_rate: f64,
    pub service_fee: i64,
    pub gateway_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            razorpay_key_id: env::var("RAZORPAY_KEY_ID").expect("RAZORPAY_KEY_ID must be set"),
            razorpay_key_secret: env::var("RAZORPAY_KEY_SECRET").expect("RAZORPAY_KEY_SECRET must be set"),
            razorpay_api_url: env::var("RAZORPAY_API_URL").unwrap_or_else(|_| "https://api.razorpay.com".to_string()),
            currency: env::var("CURRENCY").unwrap_or_else(|_| "INR".to_string()),
            pricing_policy: env::var("PRICING_POLICY").unwrap_or_else(|_| "tax_inclusive".to_string()),
            tax_rate: env::var("TAX_RATE").unwrap_or_else(|_| "0.18".to_string()).parse().expect("TAX_RATE must be a number"),
            service_fee: env::var("SERVICE_FEE").unwrap_or_else(|_| "200".to_string()).parse().expect("SERVICE_FEE must be a number"),
            gateway_timeout_secs: env::var("GATEWAY_TIMEOUT_SECS").unwrap_or_else(|_| "10".to_string()).parse().expect("GATEWAY_TIMEOUT_SECS must be a number"),
        }
    }
}
