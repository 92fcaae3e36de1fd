//! Pure totals computation.

use opd_schemas::Money;

use crate::draft::OrderDraft;

/// Per-line amounts (in line order) and the category total for one
/// recompute pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftTotals {
    pub line_amounts: Vec<Money>,
    pub category_total: Money,
}

impl DraftTotals {
    /// Totals for a draft with no lines.
    pub fn empty() -> Self {
        Self {
            line_amounts: Vec::new(),
            category_total: Money::ZERO,
        }
    }
}

/// Compute every line amount and the category total from scratch.
///
/// Rules:
/// - amount_i = unit_price_i × quantity_i
/// - category_total = Σ amount_i over the draft's current lines, in line
///   order
/// - No IO, no mutation, no cached state: every call recomputes from the
///   draft as it stands, so the result stays consistent when lines were
///   added or removed since the previous edit (e.g. on category change).
///
/// A per-line multiplication that would overflow `i64` saturates at
/// `Money::MAX` instead of wrapping; quantities reachable through
/// `coerce_quantity` cannot trigger this with realistic prices.
pub fn recompute(draft: &OrderDraft) -> DraftTotals {
    let lines = draft.lines();

    let mut line_amounts = Vec::with_capacity(lines.len());
    let mut category_total = Money::ZERO;

    for line in lines {
        let amount = line
            .unit_price
            .checked_mul_qty(line.quantity)
            .unwrap_or(Money::MAX);
        line_amounts.push(amount);
        category_total = category_total.saturating_add(amount);
    }

    DraftTotals {
        line_amounts,
        category_total,
    }
}
