use anyhow::Context;
use dotenvy::dotenv;
use lessonhub::lessonhub_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
use lessonhub::lessonhub_db::{Database, init_db_pool, run_migrations};
use lessonhub::logging::init_tracing;
use lessonhub::router::init_router;
use lessonhub::state::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let db_config = DatabaseConfig::from_env()?;
    let server_config = ServerConfig::from_env();

    let pool = init_db_pool(&db_config)
        .await
        .context("Failed to connect to database")?;
    if db_config.run_migrations {
        run_migrations(&pool).await?;
    }

    let state = AppState::new(
        Database::postgres(pool),
        &JwtConfig::from_env(),
        CorsConfig::from_env(),
    );
    let app = init_router(state);

    let address = server_config.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(%address, "Server running");
    info!("Swagger UI available at http://{address}/swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
