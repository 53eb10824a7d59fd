use contracts::system::auth::{SessionTokens, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    /// Set once the backend confirmed the token
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn is_confirmed(&self) -> bool {
        self.access_token.is_some() && self.user_info.is_some()
    }

    pub fn email(&self) -> String {
        self.user_info
            .as_ref()
            .and_then(|u| u.email.clone())
            .unwrap_or_default()
    }

    /// Profile picture of the signed-in user, if the account has one
    pub fn avatar_url(&self) -> Option<String> {
        self.user_info
            .as_ref()
            .and_then(|u| u.avatar_url.clone())
            .filter(|url| !url.trim().is_empty())
    }
}

/// Auth context provider component
///
/// A token found in localStorage is kept only if the backend still accepts it
/// or the stored refresh token renews it.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let stored = storage::get_access_token();
    let (auth_state, set_auth_state) = signal(AuthState {
        access_token: stored.clone(),
        user_info: None,
    });

    if let Some(access_token) = stored {
        spawn_local(async move {
            match api::get_session(&access_token).await {
                Ok(user_info) => set_auth_state.update(|s| {
                    // The stored token may have been refreshed meanwhile
                    s.access_token = storage::get_access_token();
                    s.user_info = Some(user_info);
                }),
                Err(e) => {
                    log::warn!("Stored session rejected: {}", e);
                    storage::clear_tokens();
                    set_auth_state.set(AuthState::default());
                }
            }
        });
    }

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Stores freshly issued tokens and confirms them against the backend.
/// The session is dropped again when it cannot be retrieved.
pub async fn establish_session(
    tokens: SessionTokens,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), String> {
    storage::save_session(&tokens);
    match api::get_session(&tokens.access_token).await {
        Ok(user_info) => {
            set_auth_state.set(AuthState {
                access_token: storage::get_access_token().or(Some(tokens.access_token)),
                user_info: Some(user_info),
            });
            Ok(())
        }
        Err(e) => {
            storage::clear_tokens();
            set_auth_state.set(AuthState::default());
            Err(e)
        }
    }
}

/// Forgets the session locally after a rejected request
pub fn drop_session(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}

/// Helper: Perform sign-out. Local state is cleared even when the backend call fails.
pub async fn do_sign_out(set_auth_state: WriteSignal<AuthState>) {
    if let Err(e) = api::sign_out().await {
        log::warn!("Sign-out request failed: {}", e);
    }
    drop_session(set_auth_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_needs_token_and_user() {
        let mut state = AuthState::default();
        assert!(!state.is_confirmed());

        state.access_token = Some("t".into());
        assert!(!state.is_confirmed());

        state.user_info = Some(UserInfo {
            id: "u".into(),
            email: None,
            avatar_url: None,
        });
        assert!(state.is_confirmed());
    }

    #[test]
    fn test_profile_fields() {
        let mut state = AuthState::default();
        assert_eq!(state.email(), "");
        assert_eq!(state.avatar_url(), None);

        state.user_info = Some(UserInfo {
            id: "u".into(),
            email: Some("ada@example.com".into()),
            avatar_url: Some(" ".into()),
        });
        assert_eq!(state.email(), "ada@example.com");
        assert_eq!(state.avatar_url(), None);

        state.user_info = Some(UserInfo {
            id: "u".into(),
            email: None,
            avatar_url: Some("https://cdn.example.com/ada.png".into()),
        });
        assert_eq!(
            state.avatar_url().as_deref(),
            Some("https://cdn.example.com/ada.png")
        );
    }
}
