//! The in-progress, uncommitted order.

use opd_catalog::{CatalogSnapshot, ProductId};
use opd_schemas::Money;

use crate::quantity::coerce_quantity;

/// One product's entry within a draft.
///
/// Keyed by the product's stable id; the unit price is captured from the
/// snapshot at selection time (the snapshot is immutable for the session,
/// so the captured price cannot go stale). The derived amount is never
/// stored here — `recompute` produces it fresh on every call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

/// The lines for one selected category, in catalog order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySelection {
    pub category: String,
    pub lines: Vec<OrderLine>,
}

/// The in-progress order for one retailer/category pair.
///
/// `selection` distinguishes two states the totals cannot: `None` means
/// no category has been selected yet (submission is blocked), while
/// `Some` with zero lines means a category was selected but offers no
/// products (submission yields an empty batch). Both compute a zero
/// total.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderDraft {
    retailer: Option<String>,
    selection: Option<CategorySelection>,
}

impl OrderDraft {
    /// Empty draft: no retailer, no category.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the retailer selection.
    ///
    /// Resolution against the snapshot happens at build time; an unknown
    /// name is a submission validation error, not an entry error.
    pub fn select_retailer(&mut self, name: impl Into<String>) {
        self.retailer = Some(name.into());
    }

    pub fn retailer(&self) -> Option<&str> {
        self.retailer.as_deref()
    }

    /// Replace the current selection with one zero-quantity line per
    /// product in `category`, in catalog order.
    ///
    /// Always discards quantities entered for a previous category — no
    /// merge, no warning. Selecting a category the snapshot does not know
    /// (or one with no products) is a valid selection with zero lines.
    pub fn select_category(&mut self, snapshot: &CatalogSnapshot, category: impl Into<String>) {
        let category = category.into();
        let lines = snapshot
            .products_in_category(&category)
            .into_iter()
            .map(|p| OrderLine {
                product_id: p.id,
                product_name: p.name.clone(),
                unit_price: p.unit_price,
                quantity: 0,
            })
            .collect();
        self.selection = Some(CategorySelection { category, lines });
    }

    /// Return the draft to the no-category state, discarding all lines.
    pub fn clear_category(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<&CategorySelection> {
        self.selection.as_ref()
    }

    pub fn category(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.category.as_str())
    }

    /// Lines of the current selection, in catalog order.
    pub fn lines(&self) -> &[OrderLine] {
        match &self.selection {
            Some(s) => &s.lines,
            None => &[],
        }
    }

    /// Set the quantity of exactly one line.
    ///
    /// Returns `false` (and changes nothing) when `product_id` is not in
    /// the current selection — the id belongs to another category or to
    /// no product at all.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        let Some(sel) = self.selection.as_mut() else {
            return false;
        };
        match sel.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Set a quantity from raw field content, coercing malformed input
    /// to 0 (see [`coerce_quantity`]).
    pub fn set_quantity_input(&mut self, product_id: ProductId, raw: Option<&str>) -> bool {
        self.set_quantity(product_id, coerce_quantity(raw))
    }

    /// Assemble a draft from parts, bypassing selection through a
    /// snapshot. Unit tests only.
    #[cfg(test)]
    pub(crate) fn from_parts(
        retailer: Option<String>,
        selection: Option<CategorySelection>,
    ) -> Self {
        Self {
            retailer,
            selection,
        }
    }
}
