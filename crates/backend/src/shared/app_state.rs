use std::sync::Arc;

use super::config::Config;
use super::gateway::{AuthGateway, DataGateway};
use super::payments::CheckoutGateway;

/// Handles shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<dyn DataGateway>,
    pub auth: Arc<dyn AuthGateway>,
    pub checkout: Arc<dyn CheckoutGateway>,
    pub config: Arc<Config>,
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::shared::config::test_config;
    use crate::shared::error::DashboardError;
    use crate::shared::gateway::fake::FakeGateway;
    use async_trait::async_trait;
    use contracts::system::checkout::CheckoutItem;

    pub struct FakeCheckout {
        pub fail_with: Option<String>,
    }

    #[async_trait]
    impl CheckoutGateway for FakeCheckout {
        async fn create_checkout_session(
            &self,
            items: &[CheckoutItem],
        ) -> Result<String, DashboardError> {
            match &self.fail_with {
                Some(message) => Err(DashboardError::Remote(message.clone())),
                None => Ok(format!("cs_test_{}", items.len())),
            }
        }
    }

    /// State backed by one fake serving both data and auth
    pub fn state_with(gateway: FakeGateway) -> (AppState, Arc<FakeGateway>) {
        let gateway = Arc::new(gateway);
        let state = AppState {
            data: gateway.clone(),
            auth: gateway.clone(),
            checkout: Arc::new(FakeCheckout { fail_with: None }),
            config: Arc::new(test_config()),
        };
        (state, gateway)
    }
}
