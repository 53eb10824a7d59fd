//! Authentication DTOs, page routes and form validation
//!
//! Every auth action answers with an [`AuthActionResponse`]: where the client
//! should navigate next and an optional flash message to show there.

use serde::{Deserialize, Serialize};

pub const SIGN_IN_PAGE: &str = "/sign-in";
pub const SIGN_UP_PAGE: &str = "/sign-up";
pub const FORGOT_PASSWORD_PAGE: &str = "/forgot-password";
pub const PROTECTED_PAGE: &str = "/protected";
pub const RESET_PASSWORD_PAGE: &str = "/protected/reset-password";

pub const SIGN_UP_PATH: &str = "/api/auth/sign-up";
pub const SIGN_IN_PATH: &str = "/api/auth/sign-in";
pub const FORGOT_PASSWORD_PATH: &str = "/api/auth/forgot-password";
pub const RESET_PASSWORD_PATH: &str = "/api/auth/reset-password";
pub const SIGN_OUT_PATH: &str = "/api/auth/sign-out";
pub const SESSION_PATH: &str = "/api/auth/session";
pub const REFRESH_PATH: &str = "/api/auth/refresh";

pub const MSG_EMAIL_PASSWORD_REQUIRED: &str = "Email and password are required";
pub const MSG_SIGN_UP_SUCCESS: &str =
    "Thanks for signing up! Please check your email for a verification link.";
pub const MSG_SESSION_FAILED: &str = "Failed to establish session. Please try again.";
pub const MSG_EMAIL_REQUIRED: &str = "Email is required";
pub const MSG_RESET_FAILED: &str = "Could not reset password";
pub const MSG_RESET_SENT: &str = "Check your email for a link to reset your password.";
pub const MSG_PASSWORDS_REQUIRED: &str = "Password and confirm password are required";
pub const MSG_PASSWORDS_MISMATCH: &str = "Passwords do not match";
pub const MSG_PASSWORD_UPDATE_FAILED: &str = "Password update failed";
pub const MSG_PASSWORD_UPDATED: &str = "Password updated successfully.";
pub const MSG_REFRESH_TOKEN_REQUIRED: &str = "Refresh token is required";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl SignUpRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(MSG_EMAIL_PASSWORD_REQUIRED);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
    /// Where to send the user after the reset mail went out
    #[serde(default)]
    pub callback_url: Option<String>,
}

impl ForgotPasswordRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.is_empty() {
            return Err(MSG_EMAIL_REQUIRED);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl ResetPasswordRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.password.is_empty() || self.confirm_password.is_empty() {
            return Err(MSG_PASSWORDS_REQUIRED);
        }
        if self.password != self.confirm_password {
            return Err(MSG_PASSWORDS_MISMATCH);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Exchanges the refresh token of an expired session for new tokens
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

impl RefreshRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.refresh_token.trim().is_empty() {
            return Err(MSG_REFRESH_TOKEN_REQUIRED);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    /// Query parameter that carries the message
    pub fn param(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub message: String,
}

impl FlashMessage {
    /// Reads the message back from `?error=` / `?success=` query values
    pub fn from_query(error: Option<String>, success: Option<String>) -> Option<Self> {
        if let Some(message) = error.filter(|m| !m.is_empty()) {
            return Some(Self {
                kind: FlashKind::Error,
                message,
            });
        }
        success.filter(|m| !m.is_empty()).map(|message| Self {
            kind: FlashKind::Success,
            message,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthActionResponse {
    pub redirect: String,
    #[serde(default)]
    pub flash: Option<FlashMessage>,
    /// Present only after a confirmed sign-in
    #[serde(default)]
    pub session: Option<SessionTokens>,
}

impl AuthActionResponse {
    pub fn redirect(path: impl Into<String>) -> Self {
        Self {
            redirect: path.into(),
            flash: None,
            session: None,
        }
    }

    /// Redirect to `path` with a message encoded in the query string
    pub fn encoded(kind: FlashKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            redirect: path.into(),
            flash: Some(FlashMessage {
                kind,
                message: message.into(),
            }),
            session: None,
        }
    }

    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::encoded(FlashKind::Error, path, message)
    }

    pub fn success(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::encoded(FlashKind::Success, path, message)
    }

    pub fn with_session(mut self, session: SessionTokens) -> Self {
        self.session = Some(session);
        self
    }

    /// Location the client navigates to, e.g. `/sign-in?error=Invalid%20login`
    pub fn location(&self) -> String {
        match &self.flash {
            Some(flash) => format!(
                "{}?{}={}",
                self.redirect,
                flash.kind.param(),
                urlencoding::encode(&flash.message)
            ),
            None => self.redirect.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_up_requires_both_fields() {
        let missing = SignUpRequest {
            email: "a@b.c".into(),
            password: String::new(),
        };
        assert_eq!(missing.validate(), Err(MSG_EMAIL_PASSWORD_REQUIRED));

        let ok = SignUpRequest {
            email: "a@b.c".into(),
            password: "secret".into(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn reset_password_checks_presence_before_match() {
        let empty = ResetPasswordRequest::default();
        assert_eq!(empty.validate(), Err(MSG_PASSWORDS_REQUIRED));

        let mismatch = ResetPasswordRequest {
            password: "one".into(),
            confirm_password: "two".into(),
        };
        assert_eq!(mismatch.validate(), Err(MSG_PASSWORDS_MISMATCH));
    }

    #[test]
    fn refresh_requires_token() {
        assert_eq!(
            RefreshRequest::default().validate(),
            Err(MSG_REFRESH_TOKEN_REQUIRED)
        );
        let request = RefreshRequest {
            refresh_token: "r1".into(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn location_encodes_flash_message() {
        let response = AuthActionResponse::error(SIGN_IN_PAGE, "Invalid login credentials");
        assert_eq!(response.location(), "/sign-in?error=Invalid%20login%20credentials");

        let plain = AuthActionResponse::redirect(PROTECTED_PAGE);
        assert_eq!(plain.location(), "/protected");
    }

    #[test]
    fn flash_from_query_prefers_error() {
        let flash = FlashMessage::from_query(Some("bad".into()), Some("good".into())).unwrap();
        assert_eq!(flash.kind, FlashKind::Error);

        let flash = FlashMessage::from_query(None, Some("good".into())).unwrap();
        assert_eq!(flash.kind, FlashKind::Success);

        assert!(FlashMessage::from_query(Some(String::new()), None).is_none());
    }
}
