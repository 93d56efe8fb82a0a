use std::path::PathBuf;

use clap::{Parser, Subcommand};
use trivia_api::configuration::DatabaseSettings;
use trivia_api::db::transfer::{export_data, import_data};
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Database path
    db_path: PathBuf,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Export categories.csv and questions.csv into a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = DatabaseSettings {
        url: format!("sqlite:{}", cli.db_path.display()),
        max_connections: 1,
        create_if_missing: true,
    };
    let pool = establish_connection(&settings).await?;
    run_migrations(&pool).await?;

    let res = match cli.command {
        Commands::Export { path } => export_data(&pool, &path).await,
        Commands::Import { path } => import_data(&pool, &path).await,
    };
    pool.close().await;
    res
}
