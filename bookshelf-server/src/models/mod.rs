//! Domain models
//!
//! Records mirror table rows. Write payloads carry only the mutable
//! fields; ids are always generated by the store.

pub mod validation;
pub mod author;
pub mod book;

pub use validation::ValidationError;
pub use author::{Author, NewAuthor};
pub use book::{Book, NewBook};
