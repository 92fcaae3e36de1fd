//! Source boundary for catalog data.
//!
//! This module defines only the raw row types, the [`CatalogSource`]
//! trait, and the load-time error taxonomy. Prices stay as decimal
//! strings here; conversion to fixed-point [`opd_schemas::Money`] happens
//! in snapshot construction, deterministically, with no floating point at
//! the boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A retailer row as returned verbatim by a catalog source.
///
/// Only `name` is required to be non-empty at load time; blank
/// salesperson fields surface later as submission validation errors, not
/// load failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRetailer {
    pub name: String,
    pub salesperson: String,
    pub team: String,
    pub email: String,
}

/// A category row as returned verbatim by a catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCategory {
    pub name: String,
}

/// A product row as returned verbatim by a catalog source.
///
/// `price` is a decimal string (e.g. `"20.00"`) so the snapshot can
/// normalise it without floating-point rounding being introduced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProduct {
    pub name: String,
    pub category: String,
    pub price: String,
}

/// Errors produced while loading the catalog.
///
/// Every variant is fatal at session start; none is recoverable
/// mid-session.
#[derive(Debug)]
pub enum CatalogError {
    /// An I/O failure reading source data.
    Io(String),
    /// A CSV header row is missing a required column.
    MissingHeader { file: &'static str, column: &'static str },
    /// A source row field is missing or unusable.
    ParseField {
        file: &'static str,
        row: usize,
        field: &'static str,
        raw: String,
    },
    /// A product price string did not parse as a non-negative two-decimal
    /// amount.
    InvalidPrice {
        product: String,
        raw: String,
        detail: String,
    },
    /// Two retailer rows share a name; lookup by name would be ambiguous.
    DuplicateRetailer(String),
    /// Two category rows share a name.
    DuplicateCategory(String),
    /// A product names a category absent from the category list.
    UnknownProductCategory { product: String, category: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(msg) => write!(f, "catalog io error: {msg}"),
            CatalogError::MissingHeader { file, column } => {
                write!(f, "{file}: missing required header column '{column}'")
            }
            CatalogError::ParseField { file, row, field, raw } => {
                write!(
                    f,
                    "{file} row {row}: cannot use field '{field}' with value '{raw}'"
                )
            }
            CatalogError::InvalidPrice { product, raw, detail } => {
                write!(f, "product '{product}': invalid price '{raw}' ({detail})")
            }
            CatalogError::DuplicateRetailer(name) => {
                write!(f, "duplicate retailer name '{name}'")
            }
            CatalogError::DuplicateCategory(name) => {
                write!(f, "duplicate category name '{name}'")
            }
            CatalogError::UnknownProductCategory { product, category } => {
                write!(
                    f,
                    "product '{product}' references unknown category '{category}'"
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Upstream catalog data contract.
///
/// Implementations must be object-safe so the snapshot loader can take a
/// `&dyn CatalogSource`, and `Send + Sync` so one source can serve
/// concurrent session setups. Each fetch is called exactly once per
/// session, at load time.
pub trait CatalogSource: Send + Sync {
    /// Human-readable name identifying this source (e.g. `"csv"`).
    fn name(&self) -> &'static str;

    fn fetch_retailers(&self) -> Result<Vec<RawRetailer>, CatalogError>;

    fn fetch_categories(&self) -> Result<Vec<RawCategory>, CatalogError>;

    fn fetch_products(&self) -> Result<Vec<RawProduct>, CatalogError>;
}
