use axum::extract::State;
use axum::Json;
use contracts::system::checkout::{CheckoutRequest, CheckoutResponse};

use crate::shared::app_state::AppState;

/// POST /api/checkout
///
/// Provider failures are reported in the `error` field with status 200.
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Json<CheckoutResponse> {
    match state.checkout.create_checkout_session(&request.items).await {
        Ok(session_id) => {
            tracing::info!("Checkout session {} created", session_id);
            Json(CheckoutResponse {
                session_id: Some(session_id),
                error: None,
            })
        }
        Err(e) => {
            tracing::error!("Checkout session failed: {}", e);
            Json(CheckoutResponse {
                session_id: None,
                error: Some(e.to_string()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::app_state::testing::{state_with, FakeCheckout};
    use crate::shared::gateway::fake::FakeGateway;
    use contracts::system::checkout::CheckoutItem;
    use std::sync::Arc;

    fn request() -> Json<CheckoutRequest> {
        Json(CheckoutRequest {
            items: vec![CheckoutItem {
                price: "price_basic".into(),
                quantity: 2,
            }],
        })
    }

    #[tokio::test]
    async fn test_returns_session_id() {
        let (state, _) = state_with(FakeGateway::default());
        let Json(response) = create_session(State(state), request()).await;

        assert_eq!(response.session_id.as_deref(), Some("cs_test_1"));
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_provider_error_in_body() {
        let (mut state, _) = state_with(FakeGateway::default());
        state.checkout = Arc::new(FakeCheckout {
            fail_with: Some("No such price".into()),
        });
        let Json(response) = create_session(State(state), request()).await;

        assert_eq!(response.error.as_deref(), Some("No such price"));
        assert!(response.session_id.is_none());
    }
}
