use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use contracts::system::auth::UserInfo;

use crate::shared::app_state::AppState;
use crate::shared::error::DashboardError;
use crate::shared::gateway::AuthGateway;

/// Session resolved by [`require_session`], stored in request extensions
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub access_token: String,
    pub user: UserInfo,
}

/// Token of an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// A request carries a session only if the gateway accepts its token
pub async fn resolve_session(
    auth: &dyn AuthGateway,
    headers: &HeaderMap,
) -> Result<SessionContext, DashboardError> {
    let token = bearer_token(headers)
        .ok_or_else(|| DashboardError::Session("Missing bearer token".into()))?;

    let user = auth.get_user(token).await.map_err(|e| {
        tracing::debug!("Session rejected: {}", e);
        DashboardError::Session("Session expired or invalid".into())
    })?;

    Ok(SessionContext {
        access_token: token.to_string(),
        user,
    })
}

/// Middleware that requires a session accepted by the gateway
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, DashboardError> {
    let session = resolve_session(state.auth.as_ref(), req.headers()).await?;
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::gateway::fake::{FakeGateway, VALID_TOKEN};
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_accepted_token_resolves_user() {
        let gateway = FakeGateway::default();
        let session = resolve_session(&gateway, &headers(&format!("Bearer {}", VALID_TOKEN)))
            .await
            .unwrap();

        assert_eq!(session.access_token, VALID_TOKEN);
        assert_eq!(session.user.id, "user-1");
    }

    #[tokio::test]
    async fn test_rejected_or_missing_token_is_session_error() {
        let gateway = FakeGateway::default();

        let rejected = resolve_session(&gateway, &headers("Bearer forged")).await;
        assert!(matches!(rejected, Err(DashboardError::Session(_))));

        let missing = resolve_session(&gateway, &HeaderMap::new()).await;
        assert!(matches!(missing, Err(DashboardError::Session(_))));
    }
}
