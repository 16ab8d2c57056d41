use serde::{Deserialize, Serialize};

/// Request for a gateway-side order. Amount is in minor currency units
/// (paise for INR), as the gateway expects.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub notes: OrderNotes,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderNotes {
    pub listing_id: String,
    pub listing_title: String,
    pub user_id: String,
    pub nights: i32,
    pub guests: i32,
}

/// The slice of the gateway's order object the booking core keeps.
/// The order's lifecycle stays with the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}
