//! The immutable per-session catalog view.

use std::collections::HashMap;

use opd_schemas::Money;

use crate::source::{CatalogError, CatalogSource};
use crate::types::{Category, Product, ProductId, Retailer};

/// Immutable, validated view of retailers, categories, and products,
/// loaded once per session.
///
/// Construction is the only write path; afterwards the snapshot is
/// read-only and may be shared by reference across concurrent sessions
/// without locking. [`ProductId`]s are assigned in product load order and
/// are stable for the snapshot's lifetime.
#[derive(Debug)]
pub struct CatalogSnapshot {
    retailers: Vec<Retailer>,
    categories: Vec<Category>,
    products: Vec<Product>,
    retailer_idx: HashMap<String, usize>,
}

impl CatalogSnapshot {
    /// Fetch all three catalog lists from `source` and freeze them.
    ///
    /// Validation performed here (each failure is fatal to the session):
    /// - retailer names must be unique (lookup would be ambiguous);
    /// - category names must be unique;
    /// - every product must name a known category;
    /// - every price must parse as a non-negative two-decimal amount.
    pub fn load(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let raw_retailers = source.fetch_retailers()?;
        let raw_categories = source.fetch_categories()?;
        let raw_products = source.fetch_products()?;

        let mut retailers = Vec::with_capacity(raw_retailers.len());
        let mut retailer_idx = HashMap::with_capacity(raw_retailers.len());
        for r in raw_retailers {
            if retailer_idx.contains_key(&r.name) {
                return Err(CatalogError::DuplicateRetailer(r.name));
            }
            retailer_idx.insert(r.name.clone(), retailers.len());
            retailers.push(Retailer {
                name: r.name,
                salesperson: r.salesperson,
                team: r.team,
                email: r.email,
            });
        }

        let mut categories = Vec::with_capacity(raw_categories.len());
        for c in raw_categories {
            if categories.iter().any(|k: &Category| k.name == c.name) {
                return Err(CatalogError::DuplicateCategory(c.name));
            }
            categories.push(Category { name: c.name });
        }

        let mut products = Vec::with_capacity(raw_products.len());
        for (i, p) in raw_products.into_iter().enumerate() {
            if !categories.iter().any(|c| c.name == p.category) {
                return Err(CatalogError::UnknownProductCategory {
                    product: p.name,
                    category: p.category,
                });
            }

            let unit_price = match Money::parse(&p.price) {
                Ok(m) if m.is_non_negative() => m,
                Ok(_) => {
                    return Err(CatalogError::InvalidPrice {
                        product: p.name,
                        raw: p.price,
                        detail: "price must be non-negative".to_string(),
                    })
                }
                Err(e) => {
                    return Err(CatalogError::InvalidPrice {
                        product: p.name,
                        raw: p.price,
                        detail: e.to_string(),
                    })
                }
            };

            products.push(Product {
                id: ProductId::new(i as u32),
                name: p.name,
                category: p.category,
                unit_price,
            });
        }

        Ok(Self {
            retailers,
            categories,
            products,
            retailer_idx,
        })
    }

    /// Look up a retailer by name.
    pub fn retailer(&self, name: &str) -> Option<&Retailer> {
        self.retailer_idx.get(name).map(|&i| &self.retailers[i])
    }

    pub fn retailers(&self) -> &[Retailer] {
        &self.retailers
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products belonging to `category`, in catalog load order.
    ///
    /// An unknown category name and a category with no products both yield
    /// an empty vec — absence of products is not an error here.
    pub fn products_in_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Look up a product by its stable id.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        // Ids are assigned as vec indices at load.
        self.products.get(id.raw() as usize)
    }
}
