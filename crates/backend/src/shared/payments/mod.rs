//! Hosted payment provider (checkout sessions)

use async_trait::async_trait;
use contracts::system::checkout::CheckoutItem;
use serde::Deserialize;

use crate::shared::config::PaymentsConfig;
use crate::shared::error::DashboardError;
use crate::shared::gateway::hosted::gateway_error_message;

#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Creates a card payment session and returns its id
    async fn create_checkout_session(&self, items: &[CheckoutItem])
        -> Result<String, DashboardError>;
}

pub struct HostedCheckout {
    client: reqwest::Client,
    api_url: String,
    secret_key: String,
    domain: String,
}

#[derive(Debug, Deserialize)]
struct CreatedSession {
    id: String,
}

impl HostedCheckout {
    pub fn new(config: &PaymentsConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
            domain: config.domain.trim_end_matches('/').to_string(),
        })
    }
}

/// Form body of `POST /v1/checkout/sessions`
pub fn checkout_form(items: &[CheckoutItem], domain: &str) -> Vec<(String, String)> {
    let mut form = vec![
        ("payment_method_types[]".to_string(), "card".to_string()),
        ("mode".to_string(), "payment".to_string()),
        ("success_url".to_string(), format!("{}/success", domain)),
        ("cancel_url".to_string(), format!("{}/cancel", domain)),
    ];
    for (i, item) in items.iter().enumerate() {
        form.push((format!("line_items[{}][price]", i), item.price.clone()));
        form.push((format!("line_items[{}][quantity]", i), item.quantity.to_string()));
    }
    form
}

/// The provider nests its message under `error.message`
fn provider_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| gateway_error_message(body))
}

#[async_trait]
impl CheckoutGateway for HostedCheckout {
    async fn create_checkout_session(
        &self,
        items: &[CheckoutItem],
    ) -> Result<String, DashboardError> {
        if items.is_empty() {
            return Err(DashboardError::Validation("No line items given".into()));
        }

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.api_url))
            .bearer_auth(&self.secret_key)
            .form(&checkout_form(items, &self.domain))
            .send()
            .await
            .map_err(|e| DashboardError::Remote(format!("Payment provider unreachable: {}", e)))?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DashboardError::Remote(provider_error_message(&text)));
        }

        let session: CreatedSession = response
            .json()
            .await
            .map_err(|e| DashboardError::Remote(format!("Invalid checkout payload: {}", e)))?;
        Ok(session.id)
    }
}
