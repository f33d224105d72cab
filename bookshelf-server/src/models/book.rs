//! Book records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Book row from the `books` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    /// Serialized as `YYYY-MM-DD`
    pub published_date: NaiveDate,
    pub author_id: i32,
}

/// Body of `POST /books` and `PATCH /books/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub published_date: NaiveDate,
    pub author_id: i32,
}

impl NewBook {
    pub fn into_book(self, id: i32) -> Book {
        Book {
            id,
            title: self.title,
            published_date: self.published_date,
            author_id: self.author_id,
        }
    }
}
