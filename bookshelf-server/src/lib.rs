//! bookshelf-server: REST API over authors and books
//!
//! Maps HTTP verbs onto parameterized SQL against PostgreSQL and wraps
//! every result in a `{status, data}` envelope.

pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use db::DbError;
pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
pub use state::AppState;
