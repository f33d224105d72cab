//! Route handlers organized by resource

pub mod health;
pub mod authors;
pub mod books;
