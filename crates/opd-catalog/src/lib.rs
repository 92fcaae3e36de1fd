//! Catalog loading and the immutable session snapshot.
//!
//! The catalog is loaded exactly once per session through a
//! [`CatalogSource`] and frozen into a [`CatalogSnapshot`]. Everything
//! downstream (draft building, submission) reads the snapshot by
//! reference; there are no mutation operations after load. A load failure
//! is fatal to the session — there is no mid-session reload.

pub mod csv;
pub mod snapshot;
pub mod source;
pub mod types;

pub use csv::CsvCatalogSource;
pub use snapshot::CatalogSnapshot;
pub use source::{CatalogError, CatalogSource, RawCategory, RawProduct, RawRetailer};
pub use types::{Category, Product, ProductId, Retailer};
