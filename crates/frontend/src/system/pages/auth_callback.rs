//! Landing page of e-mail links (sign-up confirmation, password recovery)
//!
//! The auth service appends the session to the URL fragment:
//! `/auth/callback?redirect_to=/protected/reset-password#access_token=..&refresh_token=..`

use contracts::system::auth::{AuthActionResponse, SessionTokens, PROTECTED_PAGE, SIGN_IN_PAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use serde::Deserialize;

use crate::system::auth::context::{establish_session, use_auth};

const LINK_INVALID: &str = "The link is invalid or has expired";

#[derive(Debug, Default, Deserialize)]
struct CallbackFragment {
    access_token: Option<String>,
    refresh_token: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CallbackQuery {
    redirect_to: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CallbackOutcome {
    Session {
        tokens: SessionTokens,
        redirect: String,
    },
    /// Navigate here without a session
    Failed { location: String },
}

fn failed(message: &str) -> CallbackOutcome {
    CallbackOutcome::Failed {
        location: AuthActionResponse::error(SIGN_IN_PAGE, message).location(),
    }
}

/// Only same-site paths are followed
fn safe_redirect(redirect: Option<String>) -> String {
    redirect
        .filter(|r| r.starts_with('/') && !r.starts_with("//"))
        .unwrap_or_else(|| PROTECTED_PAGE.to_string())
}

pub fn parse_callback(hash: &str, search: &str) -> CallbackOutcome {
    let fragment: CallbackFragment =
        serde_qs::from_str(hash.trim_start_matches('#')).unwrap_or_default();
    let query: CallbackQuery =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();

    if let Some(description) = fragment.error_description {
        return failed(&description);
    }

    match (fragment.access_token, fragment.refresh_token) {
        (Some(access_token), Some(refresh_token)) if !access_token.is_empty() => {
            CallbackOutcome::Session {
                tokens: SessionTokens {
                    access_token,
                    refresh_token,
                },
                redirect: safe_redirect(query.redirect_to),
            }
        }
        _ => failed(LINK_INVALID),
    }
}

#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let (_, set_auth_state) = use_auth();
    let navigate = use_navigate();

    let location = web_sys::window().map(|w| w.location());
    let hash = location
        .as_ref()
        .and_then(|l| l.hash().ok())
        .unwrap_or_default();
    let search = location
        .as_ref()
        .and_then(|l| l.search().ok())
        .unwrap_or_default();

    spawn_local(async move {
        let target = match parse_callback(&hash, &search) {
            CallbackOutcome::Session { tokens, redirect } => {
                match establish_session(tokens, set_auth_state).await {
                    Ok(()) => redirect,
                    Err(e) => {
                        log::error!("Callback session rejected: {}", e);
                        AuthActionResponse::error(SIGN_IN_PAGE, LINK_INVALID).location()
                    }
                }
            }
            CallbackOutcome::Failed { location } => location,
        };
        navigate(&target, Default::default());
    });

    view! { <div class="page-loading">"Signing you in..."</div> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_and_redirect_are_read() {
        let outcome = parse_callback(
            "#access_token=abc&expires_in=3600&refresh_token=def&token_type=bearer&type=recovery",
            "?redirect_to=/protected/reset-password",
        );
        assert_eq!(
            outcome,
            CallbackOutcome::Session {
                tokens: SessionTokens {
                    access_token: "abc".into(),
                    refresh_token: "def".into(),
                },
                redirect: "/protected/reset-password".into(),
            }
        );
    }

    #[test]
    fn test_missing_redirect_goes_to_protected() {
        match parse_callback("#access_token=abc&refresh_token=def", "") {
            CallbackOutcome::Session { redirect, .. } => assert_eq!(redirect, PROTECTED_PAGE),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_foreign_redirect_is_ignored() {
        match parse_callback(
            "#access_token=abc&refresh_token=def",
            "?redirect_to=//evil.example",
        ) {
            CallbackOutcome::Session { redirect, .. } => assert_eq!(redirect, PROTECTED_PAGE),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_error_fragment_goes_to_sign_in() {
        let outcome = parse_callback("#error=access_denied&error_description=Link%20expired", "");
        assert_eq!(
            outcome,
            CallbackOutcome::Failed {
                location: "/sign-in?error=Link%20expired".into()
            }
        );
    }

    #[test]
    fn test_no_tokens_is_invalid_link() {
        assert!(matches!(
            parse_callback("", ""),
            CallbackOutcome::Failed { .. }
        ));
    }
}
