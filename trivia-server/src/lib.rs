//! trivia-server: HTTP boundary and PostgreSQL storage for the trivia engine
//!
//! - `http`: axum routes for categories, questions, search, and quizzes
//! - `db`: connection pool, schema migration, and `PgStore`

pub mod db;
pub mod http;

pub use db::PgStore;
pub use http::{build_router, run_server, AppState, ServerConfig};
