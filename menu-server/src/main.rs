use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use menu_api::{routes, state::AppState};
use menu_core::services::MenuService;
use menu_infrastructure::database::connection;
use menu_infrastructure::{HttpRendererClient, PgMenuRepository};
use menu_security::JwtService;
use menu_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    menu_shared::telemetry::init_telemetry();

    info!("Menu server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    info!("Connecting to database at {}...", config.database.url);
    let pool = connection::create_pool(&config.database.url, config.database.max_connections).await?;
    connection::run_migrations(&pool).await?;
    info!("Database connection established.");

    // Wire the service with its adapters
    let repo = Arc::new(PgMenuRepository::new(pool));
    let renderer = Arc::new(HttpRendererClient::new(
        config.renderer.url.clone(),
        Duration::from_secs(config.renderer.timeout_secs),
    ));
    let menu_service = Arc::new(MenuService::new(repo, renderer));
    let jwt = Arc::new(JwtService::new(
        &config.auth.jwt_secret,
        config.auth.token_expiry,
    ));

    let state = AppState {
        menu_service,
        jwt,
        config: config.clone(),
    };

    // Build router
    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
