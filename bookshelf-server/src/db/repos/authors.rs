//! Author repository
//!
//! One parameterized statement per operation. Writes use `RETURNING`
//! so the caller gets the stored row without a second query.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{AuthorStore, DbError};
use crate::models::{Author, NewAuthor};

const RESOURCE: &str = "author";

/// PostgreSQL-backed author repository
#[derive(Clone)]
pub struct AuthorRepo {
    pool: PgPool,
}

impl AuthorRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorStore for AuthorRepo {
    async fn list(&self) -> Result<Vec<Author>, DbError> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, last_name FROM authors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    async fn get(&self, id: i32) -> Result<Author, DbError> {
        sqlx::query_as::<_, Author>(
            "SELECT id, first_name, last_name FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    async fn create(&self, author: NewAuthor) -> Result<Author, DbError> {
        let created = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, last_name)
            VALUES ($1, $2)
            RETURNING id, first_name, last_name
            "#,
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = created.id, "author created");
        Ok(created)
    }

    async fn update(&self, id: i32, author: NewAuthor) -> Result<Author, DbError> {
        sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors SET first_name = $2, last_name = $3
            WHERE id = $1
            RETURNING id, first_name, last_name
            "#,
        )
        .bind(id)
        .bind(&author.first_name)
        .bind(&author.last_name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(RESOURCE, id));
        }
        Ok(())
    }
}
