//! The write side of a bulk load.
//!
//! [`CatalogSink`] is everything the loader needs from storage: explicit
//! transaction boundaries and one insert per entity type. [`SqliteSink`] is
//! the production implementation.

use rusqlite::{Connection, Transaction};
use thiserror::Error;

use crate::operations::{self, OperationError};
use crate::types::{BarcodeRecord, Brand, Category};

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("No transaction is open")]
    NoTransaction,
    #[error("A transaction is already open")]
    TransactionOpen,
    #[error("{0}")]
    Other(String),
}

/// Destination for catalog rows.
///
/// Inserts are only valid between [`begin`](CatalogSink::begin) and
/// [`commit`](CatalogSink::commit). Any error is treated as fatal by callers.
pub trait CatalogSink {
    fn begin(&mut self) -> Result<(), SinkError>;
    fn commit(&mut self) -> Result<(), SinkError>;
    fn insert_category(&mut self, category: &Category) -> Result<(), SinkError>;
    fn insert_brand(&mut self, brand: &Brand) -> Result<(), SinkError>;
    fn insert_barcode(&mut self, record: &BarcodeRecord) -> Result<(), SinkError>;
}

/// A [`CatalogSink`] writing to a SQLite connection.
///
/// An open transaction is rolled back if the sink is dropped before
/// `commit`.
pub struct SqliteSink<'c> {
    conn: &'c Connection,
    tx: Option<Transaction<'c>>,
}

impl<'c> SqliteSink<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn, tx: None }
    }

    /// Whether a transaction is currently open.
    pub fn in_transaction(&self) -> bool {
        self.tx.is_some()
    }

    fn open_tx(&self) -> Result<&Transaction<'c>, SinkError> {
        self.tx.as_ref().ok_or(SinkError::NoTransaction)
    }
}

impl CatalogSink for SqliteSink<'_> {
    fn begin(&mut self) -> Result<(), SinkError> {
        if self.tx.is_some() {
            return Err(SinkError::TransactionOpen);
        }
        self.tx = Some(self.conn.unchecked_transaction()?);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SinkError> {
        let tx = self.tx.take().ok_or(SinkError::NoTransaction)?;
        tx.commit()?;
        Ok(())
    }

    fn insert_category(&mut self, category: &Category) -> Result<(), SinkError> {
        operations::insert_category(self.open_tx()?, category)?;
        Ok(())
    }

    fn insert_brand(&mut self, brand: &Brand) -> Result<(), SinkError> {
        operations::insert_brand(self.open_tx()?, brand)?;
        Ok(())
    }

    fn insert_barcode(&mut self, record: &BarcodeRecord) -> Result<(), SinkError> {
        operations::insert_barcode(self.open_tx()?, record)?;
        Ok(())
    }
}
