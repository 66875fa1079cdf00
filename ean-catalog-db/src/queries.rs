//! Read queries for the catalog database.
//!
//! Used for post-load reporting and lookups by barcode or reference id.

use rusqlite::{params, Connection, OptionalExtension};

use crate::operations::OperationError;
use crate::types::{BarcodeRecord, Brand, Category};

/// Row counts for each catalog table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub categories: u64,
    pub brands: u64,
    pub barcodes: u64,
}

/// Count the rows in each catalog table.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let count = |table: &str| -> Result<u64, OperationError> {
        let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })?;
        Ok(n as u64)
    };

    Ok(CatalogStats {
        categories: count("category")?,
        brands: count("brand")?,
        barcodes: count("ean")?,
    })
}

// ── Lookups ─────────────────────────────────────────────────────────────────

/// Find a barcode record by its barcode.
pub fn find_barcode(
    conn: &Connection,
    barcode: i64,
) -> Result<Option<BarcodeRecord>, OperationError> {
    conn.query_row(
        "SELECT barcode, name, category_id, brand_id FROM ean WHERE barcode = ?1",
        params![barcode],
        |row| {
            Ok(BarcodeRecord {
                barcode: row.get(0)?,
                name: row.get(1)?,
                category_id: row.get(2)?,
                brand_id: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(Into::into)
}

/// Find a category by id.
pub fn find_category(conn: &Connection, id: i32) -> Result<Option<Category>, OperationError> {
    conn.query_row(
        "SELECT id, name FROM category WHERE id = ?1",
        params![id],
        |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )
    .optional()
    .map_err(Into::into)
}

/// Find a brand by id.
pub fn find_brand(conn: &Connection, id: i32) -> Result<Option<Brand>, OperationError> {
    conn.query_row(
        "SELECT id, name FROM brand WHERE id = ?1",
        params![id],
        |row| {
            Ok(Brand {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )
    .optional()
    .map_err(Into::into)
}

/// List the names of user-created indexes, sorted.
pub fn index_names(conn: &Connection) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'index' AND sql IS NOT NULL
         ORDER BY name",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
