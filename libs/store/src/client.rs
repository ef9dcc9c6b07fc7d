use eyre::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

#[derive(Clone)]
pub struct Client {
    pool: SqlitePool,
}

impl Client {
    pub async fn new(database_url: &str) -> Result<Self> {
        // Single connection: one writer per database, and every insert is
        // visible to the duplicate check that follows it.
        let pool = SqlitePoolOptions::new().max_connections(1).connect(database_url).await?;

        Ok(Self { pool })
    }

    pub async fn init(database_url: &str) -> Result<Self> {
        let client = Client::new(database_url).await?;

        // Create tables on startup
        sqlx::raw_sql(include_str!("../resources/create_tables.sql"))
            .execute(client.pool())
            .await?;

        Ok(client)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
