//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `BookDraft::validate()` before
//!   persistence.
//! - Repository construction rejects connections whose schema is not
//!   ready instead of failing later mid-operation.

pub mod book_repo;
