use bookshelf_core::export::csv::CSV_HEADER;
use bookshelf_core::{read_csv, write_csv, Book, ExportError};

fn sample_records() -> Vec<Book> {
    vec![
        book(1, "Dune", "Herbert", 1965),
        book(2, "Foundation", "Asimov", 1951),
        book(5, "The Left Hand of Darkness", "Le Guin", 1969),
    ]
}

fn book(id: i64, title: &str, author: &str, year: i64) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        year,
    }
}

#[test]
fn export_writes_header_then_rows_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.csv");

    write_csv(&path, &sample_records()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], CSV_HEADER.join(","));
    assert_eq!(lines[1], "1,Dune,Herbert,1965");
    assert_eq!(lines[2], "2,Foundation,Asimov,1951");
    assert_eq!(lines.len(), 4);
}

#[test]
fn round_trip_preserves_tuples_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.csv");
    let records = sample_records();

    write_csv(&path, &records).unwrap();
    let parsed = read_csv(&path).unwrap();

    assert_eq!(parsed, records);
}

#[test]
fn embedded_commas_and_quotes_survive_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quoting.csv");
    let records = vec![
        book(1, "Dune, Messiah", "Herbert", 1969),
        book(2, "The \"Lost\" Catalog", "Nobody, Jr.", 2010),
    ];

    write_csv(&path, &records).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"Dune, Messiah\""));

    let parsed = read_csv(&path).unwrap();
    assert_eq!(parsed, records);
}

#[test]
fn export_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overwrite.csv");

    write_csv(&path, &sample_records()).unwrap();
    let shorter = vec![book(9, "Ubik", "Dick", 1969)];
    write_csv(&path, &shorter).unwrap();

    let parsed = read_csv(&path).unwrap();
    assert_eq!(parsed, shorter);
}

#[test]
fn export_of_empty_catalog_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");

    write_csv(&path, &[]).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.trim_end(), CSV_HEADER.join(","));
    assert!(read_csv(&path).unwrap().is_empty());
}

#[test]
fn unwritable_path_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-subdir").join("catalog.csv");

    let err = write_csv(&path, &sample_records()).unwrap_err();
    assert!(matches!(err, ExportError::Io(_)));
}

#[test]
fn reading_file_with_wrong_header_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foreign.csv");
    std::fs::write(&path, "id,name,year\n1,Dune,1965\n").unwrap();

    let err = read_csv(&path).unwrap_err();
    assert!(matches!(err, ExportError::Malformed { line: 1, .. }));
}

#[test]
fn reading_row_with_non_numeric_id_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad-row.csv");
    std::fs::write(
        &path,
        format!("{}\nnot-a-number,Dune,Herbert,1965\n", CSV_HEADER.join(",")),
    )
    .unwrap();

    let err = read_csv(&path).unwrap_err();
    assert!(matches!(err, ExportError::Malformed { .. }));
}
