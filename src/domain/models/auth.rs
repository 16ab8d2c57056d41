use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Claims carried in the `access_token` cookie. Tokens are minted by the
/// external identity provider; this service only validates them.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub exp: i64,
}

/// The authenticated caller, as reconstructed from a validated token.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: String,
    pub username: String,
}

impl Claims {
    pub fn new(user_id: &str, username: &str, ttl_secs: i64) -> Self {
        Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: chrono::Utc::now().timestamp() + ttl_secs,
        }
    }

    pub fn into_token(self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::default(), &self, &EncodingKey::from_secret(secret.as_bytes()))
    }
}
