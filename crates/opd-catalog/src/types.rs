//! Catalog value types.

use std::fmt;

use opd_schemas::Money;

/// Stable identifier for a product within one [`crate::CatalogSnapshot`].
///
/// Assigned by the snapshot in catalog load order. Quantity entry and line
/// lookup are keyed by `ProductId`, never by display name — two products
/// may share a display name without ambiguity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(u32);

impl ProductId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        ProductId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A retailer and the salesperson account responsible for it.
///
/// Immutable for the session; looked up by name. The salesperson fields
/// here are the only source for the identity stamped on submission
/// records — they are never re-entered downstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Retailer {
    pub name: String,
    pub salesperson: String,
    pub team: String,
    pub email: String,
}

/// A product category; a pure selection key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub name: String,
}

/// One catalog product with its session-fixed unit price.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub unit_price: Money,
}
