//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable insert/list/get/delete APIs over the `books` table.
//! - Keep SQL details inside the catalog persistence boundary.
//!
//! # Invariants
//! - Write paths must call `BookDraft::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - `list_all` returns rows in insertion order (ascending id).

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::book::{Book, BookDraft, BookId, BookValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOKS_TABLE: &str = "books";
const REQUIRED_COLUMNS: &[&str] = &["id", "title", "author", "year"];

const BOOK_SELECT_SQL: &str = "SELECT id, title, author, year FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. }
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for catalog operations.
pub trait BookRepository {
    /// Inserts a validated draft and returns the fresh storage-assigned id.
    fn insert(&self, draft: &BookDraft) -> RepoResult<BookId>;
    /// Returns every record in insertion order.
    fn list_all(&self) -> RepoResult<Vec<Book>>;
    /// Looks up a single record by id.
    fn get(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Deletes by id; returns whether a row was actually removed.
    fn delete(&self, id: BookId) -> RepoResult<bool>;
    /// Returns the number of records currently stored.
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Wraps a connection after verifying its schema is ready.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not
    ///   match the latest migration known to this binary.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the
    ///   `books` shape is absent or incomplete.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = schema_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        if !table_exists(conn, BOOKS_TABLE)? {
            return Err(RepoError::MissingRequiredTable(BOOKS_TABLE));
        }

        let columns = table_columns(conn, BOOKS_TABLE)?;
        for required in REQUIRED_COLUMNS.iter().copied() {
            if !columns.iter().any(|column| column.as_str() == required) {
                return Err(RepoError::MissingRequiredColumn {
                    table: BOOKS_TABLE,
                    column: required,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn insert(&self, draft: &BookDraft) -> RepoResult<BookId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO books (title, author, year) VALUES (?1, ?2, ?3);",
            params![draft.title.as_str(), draft.author.as_str(), draft.year],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_all(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn get(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn delete(&self, id: BookId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1;", params![id])?;

        Ok(changed > 0)
    }

    fn count(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM books;", [], |row| {
                row.get::<_, i64>(0)
            })?;
        Ok(count as u64)
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let book = Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        year: row.get("year")?,
    };

    if book.title.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty title in books row id={}",
            book.id
        )));
    }
    if book.author.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty author in books row id={}",
            book.id
        )));
    }
    if book.year <= 0 {
        return Err(RepoError::InvalidData(format!(
            "non-positive year `{}` in books row id={}",
            book.year, book.id
        )));
    }

    Ok(book)
}

fn schema_version(conn: &Connection) -> RepoResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn table_exists(conn: &Connection, table_name: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table_name: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let mut rows = stmt.query([table_name])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(0)?);
    }
    Ok(columns)
}
