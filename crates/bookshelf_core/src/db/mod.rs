//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Expose catalog database bootstrap and the migration registry.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Catalog code must not read/write application data before migrations
//!   succeed.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, DbError, DbResult};
