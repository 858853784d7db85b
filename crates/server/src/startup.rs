use std::{env, net::SocketAddr, time::Duration};

use axum::http::{HeaderName, HeaderValue, Method};
use axum::Router;
use common::utils::logging::init_logging_from_env;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

use crate::routes::{self, AppState};

/// Initialize logging via shared common utils, honoring `LOG_FORMAT`
fn init_logging() {
    init_logging_from_env();
}

/// CORS layer from config. A `*` origin mirrors the request origin so
/// credentialed requests keep working; otherwise the configured list applies.
fn build_cors(cfg: &configs::CorsConfig) -> CorsLayer {
    let origin = if cfg.allowed_origins.trim() == "*" {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(
            configs::CorsConfig::split_csv(&cfg.allowed_origins)
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )
    };
    let methods: Vec<Method> = configs::CorsConfig::split_csv(&cfg.allowed_methods)
        .iter()
        .filter_map(|m| Method::from_bytes(m.as_bytes()).ok())
        .collect();
    let headers: Vec<HeaderName> = configs::CorsConfig::split_csv(&cfg.allowed_headers)
        .iter()
        .filter_map(|h| HeaderName::from_bytes(h.as_bytes()).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(cfg.allow_credentials)
        .max_age(Duration::from_secs(cfg.max_age_secs))
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cors_cfg = configs::load_default().map(|c| c.cors).unwrap_or_default();

    // DB connection + schema
    let db = models::db::connect().await?;
    migration::Migrator::up(&db, None).await?;

    let state = AppState { db };

    // Build router
    let app: Router = routes::build_router(build_cors(&cors_cfg), state);

    // Bind and serve
    let addr = load_bind_addr()?;
    info!(%addr, "starting user rest service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
