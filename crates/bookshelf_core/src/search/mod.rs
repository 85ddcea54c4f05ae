//! Title keyword filtering over loaded records.
//!
//! # Responsibility
//! - Provide the live-search behavior of the catalog UI.
//!
//! # Invariants
//! - Filtering is pure: no hidden snapshot state, callers pass the
//!   current record list explicitly.

pub mod title_filter;
