use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use tokio::runtime::Runtime;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Multi-thread runtime sized by `server.worker_threads`; tokio's default
/// (one worker per core) when unset.
pub fn build_runtime(server: &ServerConfig) -> std::io::Result<Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all().thread_name("tratamientos-worker");
    if let Some(workers) = server.worker_threads.filter(|w| *w > 0) {
        builder.worker_threads(workers);
    }
    builder.build()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, draining connections");
}

/// Connect, migrate and serve with an already validated config until ctrl-c.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    if cfg.auth.uses_dev_secret() {
        warn!("signing tokens with the public development secret; do not expose this server");
    }

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");

    let state = ServerState::from_db(db, (&cfg.auth).into());
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
