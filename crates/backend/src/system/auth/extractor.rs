use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::middleware::SessionContext;
use crate::shared::error::DashboardError;

/// Extractor for the session set by `require_session`
/// Usage in handlers: `async fn handler(CurrentSession(session): CurrentSession) -> Response`
pub struct CurrentSession(pub SessionContext);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = DashboardError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .map(CurrentSession)
            .ok_or_else(|| DashboardError::Session("No session".into()))
    }
}
