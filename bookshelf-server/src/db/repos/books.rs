//! Book repository
//!
//! `author_id` integrity is left to the `books.author_id` foreign key;
//! violations come back as `DbError::ForeignKey`.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{BookStore, DbError};
use crate::models::{Book, NewBook};

const RESOURCE: &str = "book";

/// PostgreSQL-backed book repository
#[derive(Clone)]
pub struct BookRepo {
    pool: PgPool,
}

impl BookRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BookRepo {
    async fn list(&self) -> Result<Vec<Book>, DbError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, published_date, author_id FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn get(&self, id: i32) -> Result<Book, DbError> {
        sqlx::query_as::<_, Book>(
            "SELECT id, title, published_date, author_id FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    async fn create(&self, book: NewBook) -> Result<Book, DbError> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, published_date, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, published_date, author_id
            "#,
        )
        .bind(&book.title)
        .bind(book.published_date)
        .bind(book.author_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = created.id, author_id = created.author_id, "book created");
        Ok(created)
    }

    async fn update(&self, id: i32, book: NewBook) -> Result<Book, DbError> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET title = $2, published_date = $3, author_id = $4
            WHERE id = $1
            RETURNING id, title, published_date, author_id
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(book.published_date)
        .bind(book.author_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(RESOURCE, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::db::repos::test_support::test_pool;
    use crate::db::repos::{AuthorRepo, AuthorStore};
    use crate::models::NewAuthor;

    fn new_book(author_id: i32) -> NewBook {
        NewBook {
            title: "Sketch of the Analytical Engine".into(),
            published_date: NaiveDate::from_ymd_opt(1843, 9, 1).unwrap(),
            author_id,
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get_round_trips() {
        let pool = test_pool().await;
        let author = AuthorRepo::new(pool.clone())
            .create(NewAuthor::new("Ada", "Lovelace"))
            .await
            .unwrap();
        let repo = BookRepo::new(pool);

        let created = repo.create(new_book(author.id)).await.unwrap();
        assert_eq!(created.author_id, author.id);
        assert_eq!(repo.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn unknown_author_is_foreign_key_violation() {
        let repo = BookRepo::new(test_pool().await);
        let err = repo.create(new_book(i32::MAX)).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKey { .. }), "got {err:?}");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn referenced_author_cannot_be_deleted() {
        let pool = test_pool().await;
        let authors = AuthorRepo::new(pool.clone());
        let author = authors.create(NewAuthor::new("Ada", "Lovelace")).await.unwrap();
        let book = BookRepo::new(pool).create(new_book(author.id)).await.unwrap();

        let err = authors.delete(author.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKey { .. }), "got {err:?}");
        assert_eq!(book.author_id, author.id);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_missing_is_not_found() {
        let repo = BookRepo::new(test_pool().await);
        let err = repo.delete(i32::MAX).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "book", .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_replaces_all_fields() {
        let pool = test_pool().await;
        let authors = AuthorRepo::new(pool.clone());
        let first = authors.create(NewAuthor::new("Ada", "Lovelace")).await.unwrap();
        let second = authors.create(NewAuthor::new("Charles", "Babbage")).await.unwrap();
        let repo = BookRepo::new(pool);
        let created = repo.create(new_book(first.id)).await.unwrap();

        let replacement = NewBook {
            title: "Passages from the Life of a Philosopher".into(),
            published_date: NaiveDate::from_ymd_opt(1864, 1, 1).unwrap(),
            author_id: second.id,
        };
        let updated = repo.update(created.id, replacement.clone()).await.unwrap();

        assert_eq!(updated, replacement.into_book(created.id));
        assert_eq!(repo.get(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_missing_is_not_found() {
        let repo = BookRepo::new(test_pool().await);
        let err = repo.update(i32::MAX, new_book(1)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "book", .. }), "got {err:?}");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_with_unknown_author_is_foreign_key() {
        let pool = test_pool().await;
        let author = AuthorRepo::new(pool.clone())
            .create(NewAuthor::new("Mary", "Shelley"))
            .await
            .unwrap();
        let repo = BookRepo::new(pool);
        let book = repo.create(new_book(author.id)).await.unwrap();

        let err = repo.update(book.id, new_book(i32::MAX)).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKey { .. }), "got {err:?}");
        assert_eq!(repo.get(book.id).await.unwrap(), book);
    }
}
