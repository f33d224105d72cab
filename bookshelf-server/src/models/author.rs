//! Author records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Author row from the `authors` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

/// Body of `POST /authors` and `PATCH /authors/{id}`.
///
/// Both fields are required; an update replaces them unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
}

impl NewAuthor {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Attach a store-generated id.
    pub fn into_author(self, id: i32) -> Author {
        Author {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}
