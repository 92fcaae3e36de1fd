//! CSV ingestion for the three catalog files.
//!
//! Converts CSV text (or files on disk, via [`CsvCatalogSource`]) into raw
//! catalog rows. This is the **read** side only: no snapshot validation,
//! no price normalisation — callers hand the raw rows to
//! [`crate::CatalogSnapshot::load`].
//!
//! ## Column contract (case-insensitive, order-independent)
//!
//! | File       | Column          | Example            |
//! |------------|-----------------|--------------------|
//! | retailers  | `Retailer Name` | `Corner Mart`      |
//! | retailers  | `Salesperson`   | `Asha`             |
//! | retailers  | `Team`          | `North`            |
//! | retailers  | `Email`         | `asha@example.com` |
//! | categories | `Category Name` | `Snacks`           |
//! | products   | `Product name`  | `Chips`            |
//! | products   | `Category`      | `Snacks`           |
//! | products   | `Price`         | `20.00`            |
//!
//! Field split is comma-separated with no quoting support — catalog names
//! must not contain embedded commas.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::source::{CatalogError, CatalogSource, RawCategory, RawProduct, RawRetailer};

/// Parse retailers CSV text.
///
/// Blank lines are skipped. `Retailer Name` must be non-empty per row;
/// salesperson fields may be blank (they fail submission validation, not
/// the load). An input with no header line yields an empty list.
pub fn parse_retailers_str(src: &str) -> Result<Vec<RawRetailer>, CatalogError> {
    parse_rows(
        src,
        "retailers",
        &["retailer name", "salesperson", "team", "email"],
        |get| {
            Ok(RawRetailer {
                name: get.required("retailer name")?,
                salesperson: get.optional("salesperson")?,
                team: get.optional("team")?,
                email: get.optional("email")?,
            })
        },
    )
}

/// Parse categories CSV text. `Category Name` must be non-empty per row.
pub fn parse_categories_str(src: &str) -> Result<Vec<RawCategory>, CatalogError> {
    parse_rows(src, "categories", &["category name"], |get| {
        Ok(RawCategory {
            name: get.required("category name")?,
        })
    })
}

/// Parse products CSV text.
///
/// `Product name` and `Category` must be non-empty; `Price` is carried as
/// the raw string (the snapshot rejects unparseable prices with full
/// context).
pub fn parse_products_str(src: &str) -> Result<Vec<RawProduct>, CatalogError> {
    parse_rows(
        src,
        "products",
        &["product name", "category", "price"],
        |get| {
            Ok(RawProduct {
                name: get.required("product name")?,
                category: get.required("category")?,
                price: get.optional("price")?,
            })
        },
    )
}

/// File-backed [`CatalogSource`] reading the three catalog CSVs.
pub struct CsvCatalogSource {
    retailers_path: PathBuf,
    categories_path: PathBuf,
    products_path: PathBuf,
}

impl CsvCatalogSource {
    pub fn new(
        retailers_path: impl Into<PathBuf>,
        categories_path: impl Into<PathBuf>,
        products_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            retailers_path: retailers_path.into(),
            categories_path: categories_path.into(),
            products_path: products_path.into(),
        }
    }
}

impl CatalogSource for CsvCatalogSource {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn fetch_retailers(&self) -> Result<Vec<RawRetailer>, CatalogError> {
        parse_retailers_str(&read_file(&self.retailers_path)?)
    }

    fn fetch_categories(&self) -> Result<Vec<RawCategory>, CatalogError> {
        parse_categories_str(&read_file(&self.categories_path)?)
    }

    fn fetch_products(&self) -> Result<Vec<RawProduct>, CatalogError> {
        parse_products_str(&read_file(&self.products_path)?)
    }
}

fn read_file(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path)
        .map_err(|e| CatalogError::Io(format!("read '{}': {e}", path.display())))
}

// ---------------------------------------------------------------------------
// Row machinery
// ---------------------------------------------------------------------------

/// Per-row field accessor handed to the row constructors.
struct FieldGet<'a> {
    file: &'static str,
    row: usize,
    col_idx: &'a HashMap<String, usize>,
    fields: &'a [&'a str],
}

impl FieldGet<'_> {
    fn raw(&self, name: &'static str) -> Result<&str, CatalogError> {
        let i = *self
            .col_idx
            .get(name)
            .ok_or(CatalogError::MissingHeader {
                file: self.file,
                column: name,
            })?;
        self.fields
            .get(i)
            .copied()
            .map(str::trim)
            .ok_or(CatalogError::ParseField {
                file: self.file,
                row: self.row,
                field: name,
                raw: String::new(),
            })
    }

    /// Field that must be non-empty.
    fn required(&self, name: &'static str) -> Result<String, CatalogError> {
        let v = self.raw(name)?;
        if v.is_empty() {
            return Err(CatalogError::ParseField {
                file: self.file,
                row: self.row,
                field: name,
                raw: String::new(),
            });
        }
        Ok(v.to_string())
    }

    /// Field that may be blank.
    fn optional(&self, name: &'static str) -> Result<String, CatalogError> {
        Ok(self.raw(name)?.to_string())
    }
}

fn parse_rows<T>(
    src: &str,
    file: &'static str,
    required_columns: &[&'static str],
    mut build: impl FnMut(&FieldGet<'_>) -> Result<T, CatalogError>,
) -> Result<Vec<T>, CatalogError> {
    let mut lines = src.lines();

    let header_line = match lines.next() {
        Some(l) => l,
        None => return Ok(Vec::new()),
    };

    let col_idx = build_col_index(header_line, file, required_columns)?;

    let mut out = Vec::new();
    let mut row_num: usize = 1; // 1-based, header = 0

    for line in lines {
        row_num += 1;

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Minimal CSV field split: comma-separated, no quoting.
        let fields: Vec<&str> = line.split(',').collect();

        let get = FieldGet {
            file,
            row: row_num,
            col_idx: &col_idx,
            fields: &fields,
        };

        out.push(build(&get)?);
    }

    Ok(out)
}

/// Build a case-insensitive column-name → index map from a CSV header
/// line, verifying every required column is present.
fn build_col_index(
    header_line: &str,
    file: &'static str,
    required: &[&'static str],
) -> Result<HashMap<String, usize>, CatalogError> {
    let mut idx: HashMap<String, usize> = HashMap::new();
    for (i, col) in header_line.split(',').enumerate() {
        idx.entry(col.trim().to_ascii_lowercase()).or_insert(i);
    }

    for &col in required {
        if !idx.contains_key(col) {
            return Err(CatalogError::MissingHeader { file, column: col });
        }
    }

    Ok(idx)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
