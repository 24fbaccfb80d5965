//! SQLite backend for the nettrack contact service.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod query;
mod schema;
mod seed;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use seed::SeedSummary;
pub use store::SqliteStore;
