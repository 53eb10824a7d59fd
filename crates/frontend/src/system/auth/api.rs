use contracts::shared::error::ApiErrorBody;
use contracts::system::auth::{
    AuthActionResponse, ForgotPasswordRequest, RefreshRequest, ResetPasswordRequest,
    SessionTokens, SignInRequest, SignUpRequest, UserInfo, FORGOT_PASSWORD_PATH, REFRESH_PATH,
    RESET_PASSWORD_PATH, SESSION_PATH, SIGN_IN_PATH, SIGN_OUT_PATH, SIGN_UP_PATH,
};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::storage;
use crate::shared::api_utils::api_url;

/// Error of any request made without a valid session. The stored session is
/// already cleared when this is returned.
pub const SESSION_EXPIRED: &str = "Session expired";

fn with_auth(builder: RequestBuilder, access_token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {}", access_token))
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("Request failed: {}", status),
    }
}

/// Maps a 401 to [`SESSION_EXPIRED`] and clears the stored tokens
async fn check(response: Response) -> Result<Response, String> {
    if response.status() == 401 {
        storage::clear_tokens();
        return Err(SESSION_EXPIRED.to_string());
    }
    if !response.ok() {
        return Err(error_message(response).await);
    }
    Ok(response)
}

async fn send(request: Request) -> Result<Response, String> {
    request
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))
}

/// Sends a request built for an access token. A `401` is retried once after
/// the session was refreshed.
async fn send_authorized<F>(access_token: &str, build: F) -> Result<Response, String>
where
    F: Fn(&str) -> Result<Request, String>,
{
    let response = send(build(access_token)?).await?;
    if response.status() != 401 {
        return check(response).await;
    }

    let renewed = renew_session(access_token).await?;
    check(send(build(&renewed)?).await?).await
}

/// Stored token that differs from the rejected one, i.e. a concurrent
/// request already refreshed the session
fn newer_token(rejected: &str, stored: Option<String>) -> Option<String> {
    stored.filter(|token| token != rejected)
}

/// Access token to retry with after `rejected` was refused. The stored
/// session is cleared when it cannot be refreshed.
async fn renew_session(rejected: &str) -> Result<String, String> {
    if let Some(token) = newer_token(rejected, storage::get_access_token()) {
        return Ok(token);
    }

    match refresh_session().await {
        Ok(tokens) => {
            storage::save_session(&tokens);
            log::info!("Session refreshed");
            Ok(tokens.access_token)
        }
        Err(e) => {
            log::warn!("Session refresh failed: {}", e);
            storage::clear_tokens();
            Err(SESSION_EXPIRED.to_string())
        }
    }
}

async fn refresh_session() -> Result<SessionTokens, String> {
    let refresh_token = storage::get_refresh_token().ok_or("No refresh token stored")?;
    let request = Request::post(&api_url(REFRESH_PATH))
        .json(&RefreshRequest { refresh_token })
        .map_err(|e| format!("Failed to serialize request: {}", e))?;

    let response = send(request).await?;
    if !response.ok() {
        return Err(error_message(response).await);
    }
    response
        .json::<SessionTokens>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

async fn post_action<B: Serialize>(
    path: &str,
    body: &B,
    access_token: Option<&str>,
) -> Result<AuthActionResponse, String> {
    let url = api_url(path);
    let build = |token: Option<&str>| {
        let mut builder = Request::post(&url);
        if let Some(token) = token {
            builder = with_auth(builder, token);
        }
        builder
            .json(body)
            .map_err(|e| format!("Failed to serialize request: {}", e))
    };

    let response = match access_token {
        Some(token) => send_authorized(token, |t| build(Some(t))).await?,
        None => check(send(build(None)?).await?).await?,
    };

    response
        .json::<AuthActionResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

fn session_token() -> Result<String, String> {
    storage::get_access_token().ok_or_else(|| SESSION_EXPIRED.to_string())
}

pub async fn sign_up(request: &SignUpRequest) -> Result<AuthActionResponse, String> {
    post_action(SIGN_UP_PATH, request, None).await
}

pub async fn sign_in(request: &SignInRequest) -> Result<AuthActionResponse, String> {
    post_action(SIGN_IN_PATH, request, None).await
}

pub async fn forgot_password(request: &ForgotPasswordRequest) -> Result<AuthActionResponse, String> {
    post_action(FORGOT_PASSWORD_PATH, request, None).await
}

pub async fn reset_password(request: &ResetPasswordRequest) -> Result<AuthActionResponse, String> {
    let token = session_token()?;
    post_action(RESET_PASSWORD_PATH, request, Some(&token)).await
}

pub async fn sign_out() -> Result<AuthActionResponse, String> {
    let token = session_token()?;
    post_action(SIGN_OUT_PATH, &serde_json::json!({}), Some(&token)).await
}

/// User of a session, fails when the backend does not accept the token and
/// it cannot be refreshed
pub async fn get_session(access_token: &str) -> Result<UserInfo, String> {
    send_authorized(access_token, |token| get_request(SESSION_PATH, token))
        .await?
        .json::<UserInfo>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// GET a JSON resource with the stored session
pub async fn fetch_with_auth<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = fetch_response(path).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// GET a binary resource (e.g. a CSV file) with the stored session
pub async fn fetch_bytes_with_auth(path: &str) -> Result<Vec<u8>, String> {
    let response = fetch_response(path).await?;
    response
        .binary()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))
}

fn get_request(path: &str, access_token: &str) -> Result<Request, String> {
    with_auth(Request::get(&api_url(path)), access_token)
        .build()
        .map_err(|e| format!("Failed to build request: {}", e))
}

async fn fetch_response(path: &str) -> Result<Response, String> {
    let token = session_token()?;
    send_authorized(&token, |token| get_request(path, token)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_uses_token_refreshed_by_another_request() {
        assert_eq!(
            newer_token("old", Some("new".into())).as_deref(),
            Some("new")
        );
        assert_eq!(newer_token("old", Some("old".into())), None);
        assert_eq!(newer_token("old", None), None);
    }
}
