//! Batch construction at commit time.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use opd_catalog::CatalogSnapshot;
use opd_order::OrderDraft;
use opd_schemas::{Geolocation, Money, SubmissionRecord};

/// A submission precondition violation.
///
/// Recoverable and user-facing: the draft is untouched, zero records are
/// produced, and the user may correct the draft and retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No retailer has been selected on the draft.
    NoRetailerSelected,
    /// The selected retailer name does not resolve in the catalog.
    UnknownRetailer(String),
    /// No category has been selected on the draft.
    NoCategorySelected,
    /// The resolved retailer is missing a salesperson field.
    MissingSalespersonField {
        retailer: String,
        field: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoRetailerSelected => {
                write!(f, "select a retailer before submitting")
            }
            ValidationError::UnknownRetailer(name) => {
                write!(f, "retailer '{name}' is not in the catalog")
            }
            ValidationError::NoCategorySelected => {
                write!(f, "select a product category before submitting")
            }
            ValidationError::MissingSalespersonField { retailer, field } => {
                write!(
                    f,
                    "retailer '{retailer}' has no {field} on record; submission blocked"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Materialize the draft into one [`SubmissionRecord`] per order line.
///
/// Every line currently in the draft produces a record — zero-quantity
/// lines included, so the batch documents the full product list that was
/// offered, with amount 0.00 where nothing was ordered. Amounts are
/// recomputed here from the line's unit price and quantity, not carried
/// over from an earlier render.
///
/// Batch-wide fields are captured once: all records share `now` and the
/// geolocation pair (`("0", "0")` when `geolocation` is `None`). Each
/// record receives a freshly generated UUID v4 — rebuilt batches never
/// share ids with earlier ones.
///
/// Preconditions are checked before any record is created (fail fast, no
/// partial batch): the retailer must resolve in the snapshot, a category
/// must be selected, and the resolved salesperson name, team, and email
/// must all be non-empty. A selected category with zero products is
/// valid and yields an empty batch.
pub fn build_submission(
    snapshot: &CatalogSnapshot,
    draft: &OrderDraft,
    geolocation: Option<&Geolocation>,
    now: DateTime<Utc>,
) -> Result<Vec<SubmissionRecord>, ValidationError> {
    let retailer_name = draft
        .retailer()
        .ok_or(ValidationError::NoRetailerSelected)?;
    let retailer = snapshot
        .retailer(retailer_name)
        .ok_or_else(|| ValidationError::UnknownRetailer(retailer_name.to_string()))?;

    let selection = draft
        .selection()
        .ok_or(ValidationError::NoCategorySelected)?;

    for (field, value) in [
        ("salesperson", &retailer.salesperson),
        ("team", &retailer.team),
        ("email", &retailer.email),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingSalespersonField {
                retailer: retailer.name.clone(),
                field,
            });
        }
    }

    let geo = geolocation.cloned().unwrap_or_else(Geolocation::origin);

    let records = selection
        .lines
        .iter()
        .map(|line| {
            let amount = line
                .unit_price
                .checked_mul_qty(line.quantity)
                .unwrap_or(Money::MAX);
            SubmissionRecord {
                record_id: Uuid::new_v4(),
                retailer: retailer.name.clone(),
                salesperson: retailer.salesperson.clone(),
                team: retailer.team.clone(),
                email: retailer.email.clone(),
                category: selection.category.clone(),
                product: line.product_name.clone(),
                quantity: line.quantity,
                amount,
                latitude: geo.latitude.clone(),
                longitude: geo.longitude.clone(),
                ts_utc: now,
            }
        })
        .collect();

    Ok(records)
}
