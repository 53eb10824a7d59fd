//! API utilities for frontend-backend communication

/// Port of the backend when the page is served by a dev server
const BACKEND_PORT: &str = "3000";

/// Base URL for API requests
///
/// The backend serves the built frontend itself, so the page origin is used
/// as is. Under a dev server on another port the host is kept and the
/// backend port substituted.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = location.port().unwrap_or_default();
    base_for(&protocol, &hostname, &port)
}

fn base_for(protocol: &str, hostname: &str, port: &str) -> String {
    if port.is_empty() || port == BACKEND_PORT {
        let suffix = if port.is_empty() {
            String::new()
        } else {
            format!(":{}", port)
        };
        format!("{}//{}{}", protocol, hostname, suffix)
    } else {
        format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
    }
}

/// Build a full API URL from a path
///
/// # Example
/// ```ignore
/// let url = api_url("/api/people/columns?table_name=usa");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
