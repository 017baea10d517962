use std::time::Duration;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use tuition_config::ServerConfig;
use tuition_db::run_migrations;
use tuition_manager::logging::{init_tracing, shutdown_tracer};
use tuition_manager::metrics::{init_metrics, metrics_app};
use tuition_manager::router::init_router;
use tuition_manager::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing();
    let metrics_handle = init_metrics();

    let server_config = ServerConfig::from_env();
    let state = init_app_state()
        .await
        .context("failed to connect to the database")?;

    if server_config.run_migrations {
        run_migrations(&state.db)
            .await
            .context("failed to run migrations")?;
    }

    state.dashboard_views.spawn_sweeper(Duration::from_secs(60));

    let mut app = init_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let address = server_config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    info!("Server running on http://{}", address);
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
