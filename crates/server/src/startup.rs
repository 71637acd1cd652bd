use std::net::SocketAddr;

use axum::Router;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &configs::ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address {}:{}: {}", cfg.host, cfg.port, e)))
}

/// Public entry: load config, migrate, bootstrap the admin and serve HTTP.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = configs::AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let addr = bind_addr(&cfg.server)?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Runtime(format!("migrations failed: {}", e)))?;
    info!("migrations applied");

    let state = ServerState::from_db(db, &cfg.auth);

    if let (Some(email), Some(password)) = (&cfg.auth.bootstrap_admin_email, &cfg.auth.bootstrap_admin_password) {
        state
            .auth
            .ensure_admin(email, "Administrator", password)
            .await
            .map_err(|e| StartupError::Runtime(format!("admin bootstrap failed: {}", e)))?;
    }

    let app: Router = routes::build_router(state, build_cors());

    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
