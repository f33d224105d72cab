//! In-process store
//!
//! Implements both store traits over two ordered maps. Ids come from
//! per-table counters starting at 1 and are never reused, matching
//! `SERIAL`. The `books.author_id` foreign key is enforced on insert,
//! update and author delete.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AuthorStore, BookStore, DbError, StoreHealth};
use crate::models::{Author, Book, NewAuthor, NewBook};

#[derive(Default)]
struct Tables {
    authors: BTreeMap<i32, Author>,
    books: BTreeMap<i32, Book>,
    last_author_id: i32,
    last_book_id: i32,
}

impl Tables {
    fn check_author(&self, author_id: i32) -> Result<(), DbError> {
        if self.authors.contains_key(&author_id) {
            Ok(())
        } else {
            Err(DbError::ForeignKey {
                detail: format!("Key (author_id)=({}) is not present in table \"authors\".", author_id),
            })
        }
    }
}

/// Shared in-memory tables; clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Author>, DbError> {
        Ok(self.tables.read().await.authors.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Author, DbError> {
        self.tables
            .read()
            .await
            .authors
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::not_found("author", id))
    }

    async fn create(&self, author: NewAuthor) -> Result<Author, DbError> {
        let mut tables = self.tables.write().await;
        tables.last_author_id += 1;
        let created = author.into_author(tables.last_author_id);
        tables.authors.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, author: NewAuthor) -> Result<Author, DbError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .authors
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("author", id))?;
        *slot = author.into_author(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        if !tables.authors.contains_key(&id) {
            return Err(DbError::not_found("author", id));
        }
        if tables.books.values().any(|b| b.author_id == id) {
            return Err(DbError::ForeignKey {
                detail: format!("Key (id)=({}) is still referenced from table \"books\".", id),
            });
        }
        tables.authors.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Book>, DbError> {
        Ok(self.tables.read().await.books.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Book, DbError> {
        self.tables
            .read()
            .await
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::not_found("book", id))
    }

    async fn create(&self, book: NewBook) -> Result<Book, DbError> {
        let mut tables = self.tables.write().await;
        tables.check_author(book.author_id)?;
        tables.last_book_id += 1;
        let created = book.into_book(tables.last_book_id);
        tables.books.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, book: NewBook) -> Result<Book, DbError> {
        let mut tables = self.tables.write().await;
        // Postgres reports the missing row before evaluating the constraint
        if !tables.books.contains_key(&id) {
            return Err(DbError::not_found("book", id));
        }
        tables.check_author(book.author_id)?;
        let updated = book.into_book(id);
        tables.books.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        self.tables
            .write()
            .await
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::not_found("book", id))
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), DbError> {
        // Taking the read lock proves no writer is wedged
        let _tables = self.tables.read().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn new_book(author_id: i32) -> NewBook {
        NewBook {
            title: "Frankenstein".into(),
            published_date: NaiveDate::from_ymd_opt(1818, 1, 1).unwrap(),
            author_id,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_never_reused() {
        let store = MemoryStore::new();
        let authors: &dyn AuthorStore = &store;

        let a = authors.create(NewAuthor::new("Ada", "Lovelace")).await.unwrap();
        let b = authors.create(NewAuthor::new("Mary", "Shelley")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        authors.delete(b.id).await.unwrap();
        let c = authors.create(NewAuthor::new("Grace", "Hopper")).await.unwrap();
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let store = MemoryStore::new();
        let authors: &dyn AuthorStore = &store;
        for last in ["Zed", "Alpha", "Mid"] {
            authors.create(NewAuthor::new("X", last)).await.unwrap();
        }

        let ids: Vec<i32> = authors.list().await.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn update_touches_only_the_target_row() {
        let store = MemoryStore::new();
        let authors: &dyn AuthorStore = &store;
        let a = authors.create(NewAuthor::new("Ada", "Lovelace")).await.unwrap();
        let b = authors.create(NewAuthor::new("Mary", "Shelley")).await.unwrap();

        authors
            .update(a.id, NewAuthor::new("Augusta", "King"))
            .await
            .unwrap();

        assert_eq!(authors.get(a.id).await.unwrap().first_name, "Augusta");
        assert_eq!(authors.get(b.id).await.unwrap(), b);
    }

    #[tokio::test]
    async fn book_requires_existing_author() {
        let store = MemoryStore::new();
        let books: &dyn BookStore = &store;

        let err = books.create(new_book(1)).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKey { .. }));
        assert!(books.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn referenced_author_cannot_be_deleted() {
        let store = MemoryStore::new();
        let authors: &dyn AuthorStore = &store;
        let books: &dyn BookStore = &store;

        let author = authors.create(NewAuthor::new("Mary", "Shelley")).await.unwrap();
        let book = books.create(new_book(author.id)).await.unwrap();

        let err = authors.delete(author.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKey { .. }));

        books.delete(book.id).await.unwrap();
        authors.delete(author.id).await.unwrap();
    }

    #[tokio::test]
    async fn update_missing_book_is_not_found_before_fk_check() {
        let store = MemoryStore::new();
        let books: &dyn BookStore = &store;

        let err = books.update(9, new_book(1)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "book", .. }));
    }

    #[tokio::test]
    async fn update_with_unknown_author_is_foreign_key() {
        let store = MemoryStore::new();
        let authors: &dyn AuthorStore = &store;
        let books: &dyn BookStore = &store;

        let author = authors.create(NewAuthor::new("Mary", "Shelley")).await.unwrap();
        let book = books.create(new_book(author.id)).await.unwrap();

        let err = books.update(book.id, new_book(author.id + 1)).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKey { .. }));
        assert_eq!(books.get(book.id).await.unwrap(), book);
    }

    #[tokio::test]
    async fn ping_reports_memory_backend() {
        let store = MemoryStore::new();
        assert_eq!(store.backend(), "memory");
        store.ping().await.unwrap();
    }
}
