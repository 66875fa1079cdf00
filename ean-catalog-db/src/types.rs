//! Row types stored in the barcode catalog.

/// A product category. Unique by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// A product brand. Unique by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    pub id: i32,
    pub name: String,
}

/// A single EAN/UPC barcode and the product it identifies.
///
/// `category_id` and `brand_id` reference rows that must already exist in
/// the `category` and `brand` tables when the record is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeRecord {
    pub barcode: i64,
    pub name: String,
    pub category_id: i32,
    pub brand_id: i32,
}
