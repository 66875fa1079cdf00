use ean_catalog_db::schema::{create_schema, INDEX_NAMES};
use ean_catalog_db::*;

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    // Creating again should not error
    create_schema(&conn).unwrap();
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    for table in ["category", "brand", "ean"] {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table '{}' should exist", table);
    }
}

#[test]
fn no_indexes_before_create_indexes() {
    let conn = open_memory().unwrap();
    assert!(index_names(&conn).unwrap().is_empty());
}

#[test]
fn create_indexes_builds_all_five() {
    let conn = open_memory().unwrap();
    create_indexes(&conn).unwrap();

    let mut expected: Vec<String> = INDEX_NAMES.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(index_names(&conn).unwrap(), expected);
}

#[test]
fn create_database_applies_bulk_load_pragmas() {
    let dir = tempfile::tempdir().unwrap();
    let conn = create_database(&dir.path().join("ean.db")).unwrap();

    let journal: String = conn
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .unwrap();
    assert_eq!(journal, "off");

    let synchronous: i32 = conn
        .query_row("PRAGMA synchronous", [], |row| row.get(0))
        .unwrap();
    assert_eq!(synchronous, 0);

    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn create_database_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ean.db");

    {
        let conn = create_database(&path).unwrap();
        insert_category(
            &conn,
            &Category {
                id: 1,
                name: "Tools".to_string(),
            },
        )
        .unwrap();
    }

    let conn = create_database(&path).unwrap();
    assert_eq!(catalog_stats(&conn).unwrap(), CatalogStats::default());
}
