//! PostgreSQL pool for the author and book repositories
//!
//! The pool is the only shared resource; repositories clone the handle.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::repos::{DbError, StoreHealth};

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where and how wide to connect
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Open the pool. Fails fast if the first connection cannot be made.
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.database_url)
            .await?;
        tracing::debug!(max_connections = self.max_connections, "database pool connected");
        Ok(pool)
    }
}

/// Connect with the default pool width.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PoolConfig::new(database_url).connect().await
}

#[async_trait]
impl StoreHealth for PgPool {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(self).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::test_support::test_pool;

    #[test]
    fn config_defaults_to_five_connections() {
        let config = PoolConfig::new("postgres://localhost/bookshelf");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.max_connections(12).max_connections, 12);
    }

    // Run with: DATABASE_URL=postgres://... cargo test -p bookshelf-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn schema_creates_both_tables() {
        let pool = test_pool().await;

        let (tables,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM information_schema.tables
            WHERE table_schema = current_schema()
              AND table_name IN ('authors', 'books')
            "#,
        )
        .fetch_one(&pool)
        .await
        .expect("query failed");

        assert_eq!(tables, 2);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_answers_health_ping() {
        let pool = test_pool().await;
        assert_eq!(pool.backend(), "postgres");
        pool.ping().await.expect("ping failed");
    }
}
