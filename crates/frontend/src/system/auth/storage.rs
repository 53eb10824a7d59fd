use contracts::system::auth::SessionTokens;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const REFRESH_TOKEN_KEY: &str = "auth_refresh_token";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Save both session tokens to localStorage
pub fn save_session(tokens: &SessionTokens) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, &tokens.access_token);
        let _ = storage.set_item(REFRESH_TOKEN_KEY, &tokens.refresh_token);
    }
}

/// Get access token from localStorage
pub fn get_access_token() -> Option<String> {
    get_local_storage()?
        .get_item(ACCESS_TOKEN_KEY)
        .ok()?
        .filter(|t| !t.is_empty())
}

pub fn get_refresh_token() -> Option<String> {
    get_local_storage()?
        .get_item(REFRESH_TOKEN_KEY)
        .ok()?
        .filter(|t| !t.is_empty())
}

/// Clear all authentication tokens
pub fn clear_tokens() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
    }
}
