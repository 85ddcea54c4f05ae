//! Book domain model.
//!
//! # Responsibility
//! - Define the persisted catalog record and the unvalidated draft shape.
//! - Provide the presence/numeric validation applied before any write.
//!
//! # Invariants
//! - `id` is assigned by the storage layer at creation time and is
//!   immutable thereafter; it is never reused for another record.
//! - Drafts must pass `validate()` before they may reach a write path.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by the storage layer.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BookId = i64;

/// One persisted row of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Storage-assigned id, unique and never reused.
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Publication year, always positive.
    pub year: i64,
}

/// Not-yet-persisted form input for a new record.
///
/// A draft has no id; the storage layer assigns one at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub year: i64,
}

/// Validation failure for draft input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyAuthor,
    NonPositiveYear { year: i64 },
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyAuthor => write!(f, "author must not be empty"),
            Self::NonPositiveYear { year } => {
                write!(f, "year must be a positive number, got {year}")
            }
        }
    }
}

impl Error for BookValidationError {}

impl BookDraft {
    /// Creates a draft with whitespace-trimmed title and author.
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i64) -> Self {
        Self {
            title: title.into().trim().to_string(),
            author: author.into().trim().to_string(),
            year,
        }
    }

    /// Checks the presence/numeric rules applied to form input.
    ///
    /// # Contract
    /// - Title and author must be non-empty after trimming.
    /// - Year must be strictly positive.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        if self.author.trim().is_empty() {
            return Err(BookValidationError::EmptyAuthor);
        }
        if self.year <= 0 {
            return Err(BookValidationError::NonPositiveYear { year: self.year });
        }
        Ok(())
    }
}
