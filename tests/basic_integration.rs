use std::path::Path;
use std::process::Output;

const BIN: &str = "books-db";

const BOOKS_DDL: &str = "
CREATE TABLE author(id INTEGER PRIMARY KEY, name TEXT);
CREATE TABLE book(id INTEGER PRIMARY KEY, title TEXT, author_id INTEGER);
";

/// Run the binary with `dir` as working directory
fn run_in(dir: &Path, args: &[&str]) -> Output {
    test_bin::get_test_bin(BIN)
        .current_dir(dir)
        .env_remove("BOOKS_DB_FILE")
        .env_remove("BOOKS_SCHEMA_FILE")
        .args(args)
        .output()
        .expect("Failed to start {BIN}")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn books_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ddl.sql"), BOOKS_DDL).unwrap();
    dir
}

#[test]
fn first_run_creates_schema() {
    let dir = books_dir();

    let output = run_in(dir.path(), &[]);

    assert!(output.status.success());
    assert!(dir.path().join("books.db").exists());
    assert_eq!(
        stdout(&output),
        "Creating schema\nCreated tables: author, book\n"
    );
}

#[test]
fn second_run_prints_metadata() {
    let dir = books_dir();
    assert!(run_in(dir.path(), &[]).status.success());

    // the schema must not be executed a second time
    std::fs::remove_file(dir.path().join("ddl.sql")).unwrap();
    let output = run_in(dir.path(), &[]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.starts_with("Database exists, assume schema does, too.\n"));

    let author = stdout.find("author:").unwrap();
    let book = stdout.find("book:").unwrap();
    assert!(author < book);

    let id = stdout[author..].find(" id INTEGER").unwrap();
    let name = stdout[author..].find(" name TEXT").unwrap();
    assert!(id < name);
    assert!(stdout[book..].contains("2 author_id INTEGER"));
}

#[test]
fn missing_schema_file() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_in(dir.path(), &[]);

    assert!(!output.status.success());
    assert_eq!(stdout(&output), "Creating schema\n");
    assert!(!dir.path().join("books.db").exists());
}

#[test]
fn invalid_schema_leaves_no_db() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ddl.sql"), "CREATE TABBLE author(id);").unwrap();

    let output = run_in(dir.path(), &[]);

    assert!(!output.status.success());
    assert!(!dir.path().join("books.db").exists());
}

#[test]
fn unknown_table_prints_nothing() {
    let dir = books_dir();
    assert!(run_in(dir.path(), &[]).status.success());

    let output = run_in(dir.path(), &["bootstrap", "--table", "publisher"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Database exists, assume schema does, too.\n"
    );
}

#[test]
fn custom_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("schema.sql"), BOOKS_DDL).unwrap();

    let output = run_in(
        dir.path(),
        &["--db-file", "library.sqlite", "--schema-file", "schema.sql"],
    );

    assert!(output.status.success());
    assert!(dir.path().join("library.sqlite").exists());
    assert!(!dir.path().join("books.db").exists());
}

#[test]
fn status_never_creates_db() {
    let dir = books_dir();

    let output = run_in(dir.path(), &["status"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Need to create database and schema\n");
    assert!(!dir.path().join("books.db").exists());

    assert!(run_in(dir.path(), &[]).status.success());

    let output = run_in(dir.path(), &["status"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Database exists, assume schema does, too.\n"
    );
}

#[test]
fn show_metadata_of_all_tables() {
    let dir = books_dir();
    assert!(run_in(dir.path(), &[]).status.success());

    let output = run_in(dir.path(), &["show-metadata"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.starts_with("author:\n"));
    assert!(stdout.contains("\nbook:\n"));
}

#[test]
fn show_metadata_requires_db() {
    let dir = books_dir();

    let output = run_in(dir.path(), &["show-metadata", "author"]);

    assert!(!output.status.success());
    assert!(!dir.path().join("books.db").exists());
}

#[test]
fn schema_with_transaction_control() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("ddl.sql"),
        format!("BEGIN TRANSACTION;\n{BOOKS_DDL}\nCOMMIT;\n"),
    )
    .unwrap();

    let output = run_in(dir.path(), &[]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Creating schema\nCreated tables: author, book\n"
    );
}

#[test]
fn corrupted_db() {
    let dir = books_dir();
    std::fs::write(dir.path().join("books.db"), vec![0xa5_u8; 8192]).unwrap();

    let output = run_in(dir.path(), &[]);

    assert!(!output.status.success());
    assert_eq!(
        stdout(&output),
        "Database exists, assume schema does, too.\n"
    );
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("failed to query the metadata of"));
}
