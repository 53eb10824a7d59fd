use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::{get, post},
    Router,
};
use contracts::dashboards::d400_data_browser::{COLUMNS_PATH, EXPORT_PATH, SEARCH_PATH};
use contracts::system::auth::{
    FORGOT_PASSWORD_PATH, REFRESH_PATH, RESET_PASSWORD_PATH, SESSION_PATH, SIGN_IN_PATH,
    SIGN_OUT_PATH, SIGN_UP_PATH,
};
use contracts::system::checkout::CHECKOUT_PATH;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::handlers;
use crate::shared::app_state::AppState;
use crate::system;

/// All API routes of the application
pub fn configure_routes(state: AppState) -> Router {
    // ========================================
    // PROTECTED ROUTES (session required)
    // ========================================
    let protected = Router::new()
        .route(COLUMNS_PATH, get(handlers::d400_data_browser::columns))
        .route(SEARCH_PATH, get(handlers::d400_data_browser::search))
        .route(EXPORT_PATH, get(handlers::d400_data_browser::export))
        .route(
            RESET_PASSWORD_PATH,
            post(system::handlers::auth::reset_password),
        )
        .route(SIGN_OUT_PATH, post(system::handlers::auth::sign_out))
        .route(SESSION_PATH, get(system::handlers::auth::current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            system::auth::middleware::require_session,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, must-revalidate"),
        ));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // AUTH ROUTES (PUBLIC)
        // ========================================
        .route(SIGN_UP_PATH, post(system::handlers::auth::sign_up))
        .route(SIGN_IN_PATH, post(system::handlers::auth::sign_in))
        .route(
            FORGOT_PASSWORD_PATH,
            post(system::handlers::auth::forgot_password),
        )
        .route(REFRESH_PATH, post(system::handlers::auth::refresh))
        // ========================================
        // PAYMENTS
        // ========================================
        .route(CHECKOUT_PATH, post(handlers::checkout::create_session))
        .merge(protected)
        .with_state(state)
}

/// Static bundle; client-side routes (`/auth/callback`, `/protected/..`) get `index.html`
pub fn with_frontend(router: Router, static_dir: &str) -> Router {
    let index = Path::new(static_dir).join("index.html");
    router.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)))
}
