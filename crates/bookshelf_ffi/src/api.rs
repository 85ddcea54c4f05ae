//! FFI use-case API for the single-window catalog UI.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the UI shell via FRB.
//! - Keep error semantics simple: envelopes with user-readable messages.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Form input is validated here before any write is dispatched.

use bookshelf_core::db::open_db;
use bookshelf_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, Book, BookDraft,
    BookId, CatalogService, SqliteBookRepository,
};
use log::info;
use std::path::PathBuf;
use std::sync::OnceLock;

const CATALOG_DB_FILE_NAME: &str = "bookshelf_catalog.sqlite3";
static CATALOG_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Expose the core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One grid row of the catalog as rendered by the UI shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookItem {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i64,
}

/// List/search response envelope for the catalog grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogListResponse {
    /// Grid rows (empty when there are no matches).
    pub items: Vec<BookItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Generic action response envelope for mutating operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Id of the affected record, when one exists.
    pub book_id: Option<i64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl CatalogActionResponse {
    fn success(message: impl Into<String>, book_id: Option<BookId>) -> Self {
        Self {
            ok: true,
            book_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            book_id: None,
            message: message.into(),
        }
    }
}

/// Adds a record from the three form fields.
///
/// `year` arrives as raw form text; it must parse to a positive number.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Invalid form input fails without touching the database.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_add(title: String, author: String, year: String) -> CatalogActionResponse {
    let title = title.trim();
    let author = author.trim();
    let parsed_year = year.trim().parse::<i64>();

    let year = match parsed_year {
        Ok(value) if value > 0 && !title.is_empty() && !author.is_empty() => value,
        _ => {
            return CatalogActionResponse::failure(
                "Complete the form: title, author and a positive numeric year are required.",
            );
        }
    };

    match with_catalog_service(|service| {
        let book_id = service
            .add_book(&BookDraft::new(title, author, year))
            .map_err(|err| format!("catalog_add failed: {err}"))?;
        let total = service
            .count_books()
            .map_err(|err| format!("catalog_add failed: {err}"))?;
        Ok((book_id, total))
    }) {
        Ok((book_id, total)) => CatalogActionResponse::success(
            format!("Book saved. Catalog holds {total} record(s)."),
            Some(book_id),
        ),
        Err(message) => CatalogActionResponse::failure(message),
    }
}

/// Lists every record for the catalog grid, in insertion order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_list() -> CatalogListResponse {
    list_response("catalog_list", |service| service.list_books())
}

/// Live-filters records by title keyword.
///
/// A blank keyword returns the full catalog, matching the list view.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_search(keyword: String) -> CatalogListResponse {
    list_response("catalog_search", |service| {
        service.search_books(keyword.trim())
    })
}

/// Deletes the record selected in the grid.
///
/// The record is looked up first so the confirmation can name the
/// removed title.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Deleting an absent id reports a not-found message instead of
///   failing silently.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_delete(id: i64) -> CatalogActionResponse {
    match with_catalog_service(|service| {
        let removed = service
            .get_book(id)
            .map_err(|err| format!("catalog_delete failed: {err}"))?;
        if removed.is_some() {
            service
                .delete_book(id)
                .map_err(|err| format!("catalog_delete failed: {err}"))?;
        }
        Ok(removed)
    }) {
        Ok(Some(book)) => {
            CatalogActionResponse::success(format!("Deleted \"{}\".", book.title), Some(id))
        }
        Ok(None) => CatalogActionResponse::failure(format!("No book with id {id}.")),
        Err(message) => CatalogActionResponse::failure(message),
    }
}

/// Exports the full catalog to a user-chosen CSV path.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Overwrites an existing file at `path`.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_export_csv(path: String) -> CatalogActionResponse {
    let path = path.trim();
    if path.is_empty() {
        return CatalogActionResponse::failure("Choose a file path for the export.");
    }

    match with_catalog_service(|service| {
        service
            .export_csv(path)
            .map_err(|err| format!("catalog_export_csv failed: {err}"))
    }) {
        Ok(rows) => {
            info!("event=catalog_export module=ffi status=ok rows={rows}");
            CatalogActionResponse::success(format!("Exported {rows} record(s)."), None)
        }
        Err(message) => CatalogActionResponse::failure(message),
    }
}

fn list_response(
    operation: &str,
    f: impl FnOnce(
        &CatalogService<SqliteBookRepository<'_>>,
    ) -> bookshelf_core::RepoResult<Vec<Book>>,
) -> CatalogListResponse {
    match with_catalog_service(|service| f(service).map_err(|err| format!("{operation} failed: {err}")))
    {
        Ok(books) => {
            let items = books.into_iter().map(to_book_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No records.".to_string()
            } else {
                format!("Listed {} record(s).", items.len())
            };
            CatalogListResponse { items, message }
        }
        Err(message) => CatalogListResponse {
            items: Vec::new(),
            message,
        },
    }
}

fn with_catalog_service<T>(
    f: impl FnOnce(&CatalogService<SqliteBookRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_catalog_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("catalog DB open failed: {err}"))?;
    let repo = SqliteBookRepository::try_new(&conn)
        .map_err(|err| format!("catalog repo init failed: {err}"))?;
    let service = CatalogService::new(repo);
    f(&service)
}

fn resolve_catalog_db_path() -> PathBuf {
    CATALOG_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("BOOKSHELF_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(CATALOG_DB_FILE_NAME)
        })
        .clone()
}

fn to_book_item(book: Book) -> BookItem {
    BookItem {
        id: book.id,
        title: book.title,
        author: book.author,
        year: book.year,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        catalog_add, catalog_delete, catalog_export_csv, catalog_list, catalog_search,
        core_version, init_logging,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn catalog_add_rejects_incomplete_form() {
        let missing_title = catalog_add(String::new(), "Author".to_string(), "1990".to_string());
        assert!(!missing_title.ok);

        let missing_author = catalog_add("Title".to_string(), "  ".to_string(), "1990".to_string());
        assert!(!missing_author.ok);

        let bad_year = catalog_add("Title".to_string(), "Author".to_string(), "abc".to_string());
        assert!(!bad_year.ok);
        assert!(bad_year.message.contains("year"));

        let zero_year = catalog_add("Title".to_string(), "Author".to_string(), "0".to_string());
        assert!(!zero_year.ok);
    }

    #[test]
    fn catalog_add_then_search_finds_created_record() {
        let token = unique_token("ffi-search");
        let created = catalog_add(
            format!("Book {token}"),
            "Tester".to_string(),
            "2020".to_string(),
        );
        assert!(created.ok, "{}", created.message);
        let created_id = created.book_id.expect("created book should return an id");

        let response = catalog_search(token);
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].id, created_id);
        assert_eq!(response.items[0].year, 2020);

        let listed = catalog_list();
        assert!(listed.items.iter().any(|item| item.id == created_id));
    }

    #[test]
    fn catalog_add_persists_parsed_year() {
        let token = unique_token("ffi-year");
        let created = catalog_add(token.clone(), "Tester".to_string(), " 1984 ".to_string());
        assert!(created.ok, "{}", created.message);
        let id = created.book_id.expect("created book should return an id");

        let conn =
            bookshelf_core::db::open_db(super::resolve_catalog_db_path()).expect("open db");
        let (title, year): (String, i64) = conn
            .query_row(
                "SELECT title, author, year FROM books WHERE id = ?1",
                rusqlite::params![id],
                |row| Ok((row.get(0)?, row.get(2)?)),
            )
            .expect("query created row");
        assert_eq!(title, token);
        assert_eq!(year, 1984);
    }

    #[test]
    fn catalog_delete_names_removed_title_and_reports_missing_id() {
        let token = unique_token("ffi-delete");
        let created = catalog_add(token.clone(), "Tester".to_string(), "1999".to_string());
        assert!(created.ok, "{}", created.message);
        let id = created.book_id.expect("created book should return an id");

        let first = catalog_delete(id);
        assert!(first.ok, "{}", first.message);
        assert!(first.message.contains(&token));

        let second = catalog_delete(id);
        assert!(!second.ok);
        assert!(second.message.contains("No book"));
    }

    #[test]
    fn catalog_export_csv_writes_header_row() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("export.csv");

        let response = catalog_export_csv(path.to_str().expect("utf-8 path").to_string());
        assert!(response.ok, "{}", response.message);

        let content = std::fs::read_to_string(&path).expect("read exported file");
        assert!(content.starts_with("ID,Judul,Pengarang,Tahun"));
    }

    #[test]
    fn catalog_export_csv_rejects_blank_path() {
        let response = catalog_export_csv("   ".to_string());
        assert!(!response.ok);
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
