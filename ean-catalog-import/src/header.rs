//! Header row resolution.
//!
//! Source files carry their columns in any order and may include extra
//! columns. The header row is matched against the six required column names
//! (exact, case-sensitive) to build a [`ColumnMap`] for the rest of the file.

use std::fmt;

use thiserror::Error;

/// Field delimiter for source files.
pub const DELIMITER: char = '\t';

/// A logical field required from every source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Barcode,
    Name,
    CategoryId,
    CategoryName,
    BrandId,
    BrandName,
}

impl Field {
    /// All required fields, in the order they are reported.
    pub const ALL: [Field; 6] = [
        Field::Barcode,
        Field::Name,
        Field::CategoryId,
        Field::CategoryName,
        Field::BrandId,
        Field::BrandName,
    ];

    /// The exact header text that identifies this field.
    pub fn header(self) -> &'static str {
        match self {
            Field::Barcode => "UPCEAN",
            Field::Name => "Name",
            Field::CategoryId => "CategoryID",
            Field::CategoryName => "CategoryName",
            Field::BrandId => "BrandID",
            Field::BrandName => "BrandName",
        }
    }

    fn from_header(text: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.header() == text)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("Invalid header: missing column(s) {}", join_fields(.0))]
    MissingColumns(Vec<Field>),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.header())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Column positions of the required fields within one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [usize; 6],
    max_index: usize,
}

impl ColumnMap {
    /// Resolve column positions from a header line.
    ///
    /// If a header name repeats, the last occurrence wins.
    pub fn resolve(header_line: &str) -> Result<Self, HeaderError> {
        let mut found: [Option<usize>; 6] = [None; 6];
        for (i, name) in header_line.split(DELIMITER).enumerate() {
            if let Some(field) = Field::from_header(name) {
                found[field.slot()] = Some(i);
            }
        }

        let missing: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|f| found[f.slot()].is_none())
            .collect();
        if !missing.is_empty() {
            return Err(HeaderError::MissingColumns(missing));
        }

        let indices = found.map(|i| i.unwrap_or_default());
        let max_index = indices.iter().copied().max().unwrap_or_default();
        Ok(Self { indices, max_index })
    }

    /// Column index of `field`.
    pub fn index(&self, field: Field) -> usize {
        self.indices[field.slot()]
    }

    /// Highest column index referenced by any required field.
    ///
    /// A row must have more than this many fields to be usable.
    pub fn max_index(&self) -> usize {
        self.max_index
    }

    /// Pick `field` out of an already-split row.
    ///
    /// Returns `None` if the row is too short; callers check
    /// [`max_index`](Self::max_index) first.
    pub fn get<'a>(&self, row: &[&'a str], field: Field) -> Option<&'a str> {
        row.get(self.index(field)).copied()
    }
}
