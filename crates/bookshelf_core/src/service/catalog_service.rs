//! Catalog use-case service.
//!
//! # Responsibility
//! - Provide stable add/list/search/delete/export entry points for
//!   presentation shells.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence
//!   contracts.
//! - Search is reload-then-filter: it always reflects current database
//!   contents, with no cached snapshot in between.

use crate::export::csv::{write_csv, ExportError};
use crate::model::book::{Book, BookDraft, BookId};
use crate::repo::book_repo::{BookRepository, RepoError, RepoResult};
use crate::search::title_filter::filter_by_title;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Use-case service wrapper for catalog operations.
pub struct CatalogService<R: BookRepository> {
    repo: R,
}

/// Error for the export use case, which crosses the repository and
/// file-serialization boundaries.
#[derive(Debug)]
pub enum CatalogExportError {
    Repo(RepoError),
    Export(ExportError),
}

impl Display for CatalogExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Export(err) => Some(err),
        }
    }
}

impl From<RepoError> for CatalogExportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ExportError> for CatalogExportError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl<R: BookRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a record from form input.
    ///
    /// # Contract
    /// - The draft is validated before any write is attempted.
    /// - Returns the fresh storage-assigned id.
    pub fn add_book(&self, draft: &BookDraft) -> RepoResult<BookId> {
        self.repo.insert(draft)
    }

    /// Lists every record in insertion order.
    pub fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.repo.list_all()
    }

    /// Reloads current records and filters them by title keyword.
    ///
    /// A blank keyword returns the full list.
    pub fn search_books(&self, keyword: &str) -> RepoResult<Vec<Book>> {
        let records = self.repo.list_all()?;
        Ok(filter_by_title(&records, keyword))
    }

    /// Gets one record by id.
    pub fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        self.repo.get(id)
    }

    /// Deletes a record by id; returns whether it existed.
    pub fn delete_book(&self, id: BookId) -> RepoResult<bool> {
        self.repo.delete(id)
    }

    /// Returns the number of stored records.
    pub fn count_books(&self) -> RepoResult<u64> {
        self.repo.count()
    }

    /// Exports every record to `path` as CSV, returning the row count.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<u64, CatalogExportError> {
        let records = self.repo.list_all()?;
        write_csv(path, &records)?;
        Ok(records.len() as u64)
    }
}
