use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use common::utils::logging::{init_logging_default, init_logging_json};
use configs::{AppConfig, LogFormat, LoggingConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

pub fn init_logging(cfg: &LoggingConfig) {
    match cfg.format {
        LogFormat::Compact => init_logging_default(cfg.filter.as_deref()),
        LogFormat::Json => init_logging_json(cfg.filter.as_deref()),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::permissive()
}

/// `config.toml` (or `CONFIG_PATH`) when present, otherwise environment variables only
pub fn load_config() -> Result<AppConfig, StartupError> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_config_from(Path::new(&path))
}

/// A present but invalid file is an error; only a missing file falls back to the environment.
fn load_config_from(path: &Path) -> Result<AppConfig, StartupError> {
    if !path.exists() {
        return AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(format!("environment: {e}")));
    }
    let display = path.display();
    let mut cfg = configs::load_from_file(&path.to_string_lossy())
        .map_err(|e| StartupError::InvalidConfig(format!("{display}: {e}")))?;
    cfg.normalize_and_validate()
        .map_err(|e| StartupError::InvalidConfig(format!("{display}: {e}")))?;
    Ok(cfg)
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Connect, optionally apply the schema, and build the router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(e.to_string()))?;
        info!(event = "schema_applied", "catalog schema is up to date");
    } else {
        warn!(event = "schema_skipped", "database.auto_migrate is off; expecting an existing schema");
    }
    Ok(routes::build_router(AppState::new(db), build_cors()))
}

/// Public entry: load configuration, then build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = load_config()?;
    init_logging(&cfg.logging);
    run_with_config(cfg).await
}

pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting tyre catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
