//! Core types and trait definitions for the nettrack contact service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod contact;
pub mod envelope;
pub mod error;
pub mod list;
pub mod principal;
pub mod record;
pub mod stats;
pub mod store;
pub mod view;

pub use error::{Error, Result};
pub use principal::UserId;
