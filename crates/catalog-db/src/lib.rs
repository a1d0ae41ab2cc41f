//! catalog-db: item persistence layer.
//!
//! This crate provides the [`ItemStore`] capability trait together with a
//! SQLite-backed implementation (connection pooling, embedded migrations,
//! typed queries) and an in-memory implementation for tests and
//! ephemeral runs.

pub mod migrations;
pub mod pool;
pub mod queries;
pub mod store;

pub use store::{ItemStore, MemoryItemStore, SqliteItemStore};
