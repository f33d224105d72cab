//! Repository implementations for database access
//!
//! Every store operation returns `Result<T, DbError>`: a missing row is
//! `DbError::NotFound`, never an empty value or a `false`.
//!
//! The traits are the injection seam. `AuthorRepo`/`BookRepo` talk to
//! PostgreSQL; `MemoryStore` implements both with the same constraint
//! behavior for tests and local runs.

pub mod authors;
pub mod books;
pub mod memory;

use async_trait::async_trait;
use sqlx::postgres::PgDatabaseError;

use crate::models::{Author, Book, NewAuthor, NewBook};

pub use authors::AuthorRepo;
pub use books::BookRepo;
pub use memory::MemoryStore;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[source] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("foreign key violation: {detail}")]
    ForeignKey { detail: String },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_foreign_key_violation() {
                // Postgres puts the offending key in DETAIL
                let detail = db
                    .try_downcast_ref::<PgDatabaseError>()
                    .and_then(|pg| pg.detail())
                    .unwrap_or_else(|| db.message())
                    .to_owned();
                return Self::ForeignKey { detail };
            }
        }
        Self::Sqlx(e)
    }
}

/// CRUD over the `authors` table
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// All authors, ordered by id.
    async fn list(&self) -> Result<Vec<Author>, DbError>;

    async fn get(&self, id: i32) -> Result<Author, DbError>;

    /// Insert and return the record with its generated id.
    async fn create(&self, author: NewAuthor) -> Result<Author, DbError>;

    /// Replace both name fields of an existing author.
    async fn update(&self, id: i32, author: NewAuthor) -> Result<Author, DbError>;

    /// Fails with `ForeignKey` while books still reference the author.
    async fn delete(&self, id: i32) -> Result<(), DbError>;
}

/// CRUD over the `books` table
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Book>, DbError>;

    async fn get(&self, id: i32) -> Result<Book, DbError>;

    /// Fails with `ForeignKey` when `author_id` does not exist.
    async fn create(&self, book: NewBook) -> Result<Book, DbError>;

    async fn update(&self, id: i32, book: NewBook) -> Result<Book, DbError>;

    async fn delete(&self, id: i32) -> Result<(), DbError>;
}

/// Liveness of whatever backs the stores, reported by `GET /health`
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Short backend name, e.g. `"postgres"` or `"memory"`.
    fn backend(&self) -> &'static str;

    /// Cheapest round trip that proves the backend answers.
    async fn ping(&self) -> Result<(), DbError>;
}
