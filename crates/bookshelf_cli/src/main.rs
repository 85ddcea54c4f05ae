//! Command-line shell for the book catalog.
//!
//! # Responsibility
//! - Collect form input via subcommands and dispatch catalog use cases.
//! - Render record lists as a terminal grid.
//!
//! # Invariants
//! - One database connection per invocation, opened before the first
//!   operation and held until exit.
//! - User-facing failures map to a nonzero exit code with a message.

use bookshelf_core::db::open_db;
use bookshelf_core::{
    default_log_level, init_logging, Book, BookDraft, CatalogService, SqliteBookRepository,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tabled::{settings::Style, Table, Tabled};

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(version)]
#[command(about = "Personal book catalog backed by a local SQLite file")]
struct Cli {
    /// Path to the catalog database file
    #[arg(long, global = true, default_value = "bookshelf.sqlite3")]
    database: PathBuf,

    /// Absolute directory for rolling log files (logging stays off without it)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a record from title, author and year
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        year: i64,
    },
    /// List every record as a grid
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Filter records by a case-insensitive title keyword
    Search {
        keyword: String,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Delete a record by id
    Delete { id: i64 },
    /// Export the full catalog to a CSV file
    Export { path: PathBuf },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct BookRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Year")]
    year: i64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = &cli.log_dir {
        init_logging(default_log_level(), &log_dir.display().to_string())?;
    }

    let conn = open_db(&cli.database)?;
    let repo = SqliteBookRepository::try_new(&conn)?;
    let service = CatalogService::new(repo);

    match cli.command {
        Commands::Add {
            title,
            author,
            year,
        } => {
            let id = service.add_book(&BookDraft::new(title, author, year))?;
            println!(
                "Saved book {id}. Catalog now holds {} record(s).",
                service.count_books()?
            );
        }
        Commands::List { format } => {
            render_books(&service.list_books()?, format)?;
        }
        Commands::Search { keyword, format } => {
            render_books(&service.search_books(&keyword)?, format)?;
        }
        Commands::Delete { id } => match service.get_book(id)? {
            Some(book) => {
                service.delete_book(id)?;
                println!("Deleted book {id} ({}).", book.title);
            }
            None => println!("No book with id {id}."),
        },
        Commands::Export { path } => {
            let rows = service.export_csv(&path)?;
            println!("Exported {rows} record(s) to {}.", path.display());
        }
    }

    Ok(())
}

fn render_books(books: &[Book], format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(books)?),
        OutputFormat::Table => {
            if books.is_empty() {
                println!("No records.");
            } else {
                let rows: Vec<BookRow> = books.iter().map(to_row).collect();
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
        }
    }
    Ok(())
}

fn to_row(book: &Book) -> BookRow {
    BookRow {
        id: book.id,
        title: book.title.clone(),
        author: book.author.clone(),
        year: book.year,
    }
}
