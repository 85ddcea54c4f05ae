//! FFI crate exposing catalog use cases to the desktop UI shell.
//!
//! # Responsibility
//! - Provide the bridge-facing API surface; all business logic lives in
//!   `bookshelf_core`.

pub mod api;
