pub mod dashboards;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use std::sync::Arc;

use shared::app_state::AppState;
use shared::gateway::hosted::HostedGateway;
use shared::payments::HostedCheckout;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use axum::middleware;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};

    system::tracing::initialize()?;

    let config = shared::config::load_config()?;

    let gateway = Arc::new(HostedGateway::new(&config.gateway)?);
    let checkout = Arc::new(HostedCheckout::new(&config.payments)?);
    tracing::info!("Gateway: {}", config.gateway.url);

    let state = AppState {
        data: gateway.clone(),
        auth: gateway,
        checkout,
        config: Arc::new(config.clone()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = routes::with_frontend(routes::configure_routes(state), &config.server.static_dir)
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
