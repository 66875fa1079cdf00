//! Insert operations for catalog entities.
//!
//! Statements go through rusqlite's prepared-statement cache.

use rusqlite::{params, Connection};
use thiserror::Error;

use crate::types::{BarcodeRecord, Brand, Category};

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

// ── Reference Entities ──────────────────────────────────────────────────────

/// Insert a category. Fails on a duplicate id.
pub fn insert_category(conn: &Connection, category: &Category) -> Result<(), OperationError> {
    let mut stmt = conn.prepare_cached("INSERT INTO category (id, name) VALUES (?1, ?2)")?;
    stmt.execute(params![category.id, category.name])?;
    Ok(())
}

/// Insert a brand. Fails on a duplicate id.
pub fn insert_brand(conn: &Connection, brand: &Brand) -> Result<(), OperationError> {
    let mut stmt = conn.prepare_cached("INSERT INTO brand (id, name) VALUES (?1, ?2)")?;
    stmt.execute(params![brand.id, brand.name])?;
    Ok(())
}

// ── Barcodes ────────────────────────────────────────────────────────────────

/// Insert a barcode record.
///
/// Fails on a duplicate barcode, or (with foreign keys on) when the
/// referenced category or brand has not been inserted yet.
pub fn insert_barcode(conn: &Connection, record: &BarcodeRecord) -> Result<(), OperationError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO ean (barcode, name, category_id, brand_id) VALUES (?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(params![
        record.barcode,
        record.name,
        record.category_id,
        record.brand_id,
    ])?;
    Ok(())
}
