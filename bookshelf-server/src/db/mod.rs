//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - One parameterized statement per operation
//! - Rely on DB constraints (foreign keys), surface violations as `DbError::ForeignKey`
//! - Handlers depend on the `AuthorStore`/`BookStore` traits, never on `PgPool`
//! - `GET /health` pings the backend through `StoreHealth`

pub mod pool;
pub mod repos;

pub use pool::{create_pool, PoolConfig, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
