//! Catalog export to external file formats.
//!
//! # Responsibility
//! - Serialize the current record list to user-chosen files.
//!
//! # Invariants
//! - Export never mutates catalog state.
//! - Output row order matches the supplied record order.

pub mod csv;
