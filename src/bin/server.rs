use anyhow::Context;
use trivia_api::configuration::get_configuration;
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::server::app::run_server;
use trivia_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = get_configuration()?;

    let pool = establish_connection(&settings.database)
        .await
        .with_context(|| format!("Cannot connect to {}", settings.database.url))?;
    tracing::info!("Running db migrations...");
    run_migrations(&pool).await?;

    let res = run_server(pool.clone(), &settings.application).await;
    pool.close().await;
    tracing::info!("Database connections closed");
    res
}
