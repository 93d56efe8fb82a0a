pub mod queries;
pub mod transfer;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Error;

use crate::configuration::DatabaseSettings;

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question};

pub async fn establish_connection(settings: &DatabaseSettings) -> Result<SqlitePool, Error> {
    let options =
        SqliteConnectOptions::from_str(&settings.url)?.create_if_missing(settings.create_if_missing);
    SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Single-connection in-memory database with the schema applied.
/// Every connection to `sqlite::memory:` is a separate database, so the pool is capped at one.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_owned(),
        max_connections: 1,
        create_if_missing: true,
    };
    let pool = establish_connection(&settings).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

/// Seeds the classic trivia categories and `count` questions spread across them.
#[cfg(test)]
pub(crate) async fn seed(pool: &SqlitePool, count: i64) {
    let categories = ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
        .iter()
        .enumerate()
        .map(|(n, kind)| Category {
            id: n as i64 + 1,
            kind: kind.to_string(),
        })
        .collect();
    queries::categories::import_categories(pool, categories)
        .await
        .unwrap();

    let questions = (1..=count)
        .map(|id| Question {
            id,
            question: format!("Question number {id}"),
            answer: format!("Answer {id}"),
            category: (id - 1) % 5 + 1,
            difficulty: id % 5 + 1,
        })
        .collect();
    queries::questions::import_questions(pool, questions)
        .await
        .unwrap();
}
