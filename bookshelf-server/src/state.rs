//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::{AuthorRepo, AuthorStore, BookRepo, BookStore, MemoryStore, StoreHealth};

/// Shared application state
///
/// Handlers reach storage only through the store traits, so the same
/// router runs against PostgreSQL or the in-memory store.
#[derive(Clone)]
pub struct AppState {
    authors: Arc<dyn AuthorStore>,
    books: Arc<dyn BookStore>,
    health: Arc<dyn StoreHealth>,
}

impl AppState {
    pub fn new(
        authors: Arc<dyn AuthorStore>,
        books: Arc<dyn BookStore>,
        health: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            authors,
            books,
            health,
        }
    }

    /// Repositories backed by a PostgreSQL pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(AuthorRepo::new(pool.clone())),
            Arc::new(BookRepo::new(pool.clone())),
            Arc::new(pool),
        )
    }

    /// All three roles played by one fresh `MemoryStore`.
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
        )
    }

    pub fn authors(&self) -> &dyn AuthorStore {
        self.authors.as_ref()
    }

    pub fn books(&self) -> &dyn BookStore {
        self.books.as_ref()
    }

    pub fn health(&self) -> &dyn StoreHealth {
        self.health.as_ref()
    }
}
