//! Auth actions. Every form action answers `200` with an [`AuthActionResponse`];
//! provider failures travel as flash messages, not HTTP errors. Session refresh
//! is the exception and fails with `401`.

use axum::extract::{Json, State};
use contracts::system::auth::{
    AuthActionResponse, ForgotPasswordRequest, RefreshRequest, ResetPasswordRequest,
    SessionTokens, SignInRequest, SignUpRequest, UserInfo, FORGOT_PASSWORD_PAGE, MSG_PASSWORD_UPDATED,
    MSG_PASSWORD_UPDATE_FAILED, MSG_RESET_FAILED, MSG_RESET_SENT, MSG_SESSION_FAILED,
    MSG_SIGN_UP_SUCCESS, PROTECTED_PAGE, RESET_PASSWORD_PAGE, SIGN_IN_PAGE, SIGN_UP_PAGE,
};

use crate::shared::app_state::AppState;
use crate::shared::error::DashboardError;
use crate::system::auth::extractor::CurrentSession;

/// Path of the frontend page that finishes e-mail link flows
const AUTH_CALLBACK_PAGE: &str = "/auth/callback";

fn callback_url(state: &AppState) -> String {
    format!(
        "{}{}",
        state.config.auth.site_origin.trim_end_matches('/'),
        AUTH_CALLBACK_PAGE
    )
}

pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Json<AuthActionResponse> {
    if let Err(message) = request.validate() {
        return Json(AuthActionResponse::error(SIGN_UP_PAGE, message));
    }

    let redirect_to = callback_url(&state);
    match state
        .auth
        .sign_up(&request.email, &request.password, &redirect_to)
        .await
    {
        Ok(()) => Json(AuthActionResponse::success(SIGN_UP_PAGE, MSG_SIGN_UP_SUCCESS)),
        Err(e) => {
            tracing::warn!("Sign-up of {} failed: {}", request.email, e);
            Json(AuthActionResponse::error(SIGN_UP_PAGE, e.to_string()))
        }
    }
}

/// Password sign-in. Access is granted only once the issued session can be
/// retrieved again.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Json<AuthActionResponse> {
    let tokens = match state
        .auth
        .sign_in_with_password(&request.email, &request.password)
        .await
    {
        Ok(tokens) => tokens,
        Err(e) => {
            tracing::info!("Sign-in of {} rejected: {}", request.email, e);
            return Json(AuthActionResponse::error(SIGN_IN_PAGE, e.to_string()));
        }
    };

    if let Err(e) = state.auth.get_user(&tokens.access_token).await {
        tracing::error!("Session of {} not retrievable: {}", request.email, e);
        return Json(AuthActionResponse::error(SIGN_IN_PAGE, MSG_SESSION_FAILED));
    }

    Json(AuthActionResponse::redirect(PROTECTED_PAGE).with_session(tokens))
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Json<AuthActionResponse> {
    if let Err(message) = request.validate() {
        return Json(AuthActionResponse::error(FORGOT_PASSWORD_PAGE, message));
    }

    let redirect_to = format!("{}?redirect_to={}", callback_url(&state), RESET_PASSWORD_PAGE);
    if let Err(e) = state
        .auth
        .reset_password_for_email(&request.email, &redirect_to)
        .await
    {
        tracing::error!("Password recovery for {} failed: {}", request.email, e);
        return Json(AuthActionResponse::error(FORGOT_PASSWORD_PAGE, MSG_RESET_FAILED));
    }

    match request.callback_url.filter(|url| !url.is_empty()) {
        Some(url) => Json(AuthActionResponse::redirect(url)),
        None => Json(AuthActionResponse::success(FORGOT_PASSWORD_PAGE, MSG_RESET_SENT)),
    }
}

pub async fn reset_password(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<ResetPasswordRequest>,
) -> Json<AuthActionResponse> {
    if let Err(message) = request.validate() {
        return Json(AuthActionResponse::error(RESET_PASSWORD_PAGE, message));
    }

    if let Err(e) = state
        .auth
        .update_password(&session.access_token, &request.password)
        .await
    {
        tracing::error!("Password update for {} failed: {}", session.user.id, e);
        return Json(AuthActionResponse::error(
            RESET_PASSWORD_PAGE,
            MSG_PASSWORD_UPDATE_FAILED,
        ));
    }

    Json(AuthActionResponse::success(
        RESET_PASSWORD_PAGE,
        MSG_PASSWORD_UPDATED,
    ))
}

pub async fn sign_out(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Json<AuthActionResponse> {
    if let Err(e) = state.auth.sign_out(&session.access_token).await {
        tracing::warn!("Sign-out of {} failed: {}", session.user.id, e);
    }
    Json(AuthActionResponse::redirect(SIGN_IN_PAGE))
}

/// Trades the refresh token of an expired session for a new token pair
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<SessionTokens>, DashboardError> {
    request
        .validate()
        .map_err(|message| DashboardError::Session(message.to_string()))?;

    let tokens = state
        .auth
        .refresh_session(&request.refresh_token)
        .await
        .map_err(|e| {
            tracing::info!("Session refresh rejected: {}", e);
            e
        })?;

    Ok(Json(tokens))
}

/// Get current user handler (protected by middleware)
pub async fn current_user(CurrentSession(session): CurrentSession) -> Json<UserInfo> {
    Json(session.user)
}
