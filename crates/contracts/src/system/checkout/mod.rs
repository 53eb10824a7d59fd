use serde::{Deserialize, Serialize};

pub const CHECKOUT_PATH: &str = "/api/checkout";

/// Line item of a hosted checkout session, `price` is the provider's price id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub price: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
}

/// Either `session_id` or `error` is set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
