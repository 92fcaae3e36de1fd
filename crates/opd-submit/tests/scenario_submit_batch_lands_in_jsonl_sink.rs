use chrono::{DateTime, Utc};

use opd_catalog::{
    CatalogError, CatalogSnapshot, CatalogSource, RawCategory, RawProduct, RawRetailer,
};
use opd_order::OrderDraft;
use opd_schemas::{Geolocation, Money};
use opd_submit::{build_submission, deliver, read_all, JsonlSink};

struct SnackSource;

impl CatalogSource for SnackSource {
    fn name(&self) -> &'static str {
        "snack"
    }
    fn fetch_retailers(&self) -> Result<Vec<RawRetailer>, CatalogError> {
        Ok(vec![RawRetailer {
            name: "Corner Mart".to_string(),
            salesperson: "Asha".to_string(),
            team: "North".to_string(),
            email: "asha@example.com".to_string(),
        }])
    }
    fn fetch_categories(&self) -> Result<Vec<RawCategory>, CatalogError> {
        Ok(vec![RawCategory {
            name: "Snacks".to_string(),
        }])
    }
    fn fetch_products(&self) -> Result<Vec<RawProduct>, CatalogError> {
        Ok(vec![
            RawProduct {
                name: "Chips".to_string(),
                category: "Snacks".to_string(),
                price: "20.00".to_string(),
            },
            RawProduct {
                name: "Cola".to_string(),
                category: "Snacks".to_string(),
                price: "15.00".to_string(),
            },
        ])
    }
}

#[test]
fn scenario_submitted_batch_is_durable_and_readable() {
    // GIVEN a draft for the Snacks category with one entered quantity
    let snap = CatalogSnapshot::load(&SnackSource).unwrap();
    let mut draft = OrderDraft::new();
    draft.select_retailer("Corner Mart");
    draft.select_category(&snap, "Snacks");
    let chips = draft.lines()[0].product_id;
    draft.set_quantity(chips, 3);

    // WHEN the batch is built and delivered to a JSONL sink
    let now: DateTime<Utc> = "2026-08-08T10:00:00Z".parse().unwrap();
    let geo = Geolocation::new("12.9716", "77.5946");
    let records = build_submission(&snap, &draft, Some(&geo), now).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("submissions.jsonl");
    let mut sink = JsonlSink::new(&path).unwrap();
    let receipt = deliver(&mut sink, &records).unwrap();

    // THEN every offered product landed, in build order, fully recomputable
    assert_eq!(receipt.appended, 2);
    let stored = read_all(&path).unwrap();
    assert_eq!(stored, records);

    assert_eq!(stored[0].product, "Chips");
    assert_eq!(stored[0].amount, Money::from_units(60));
    assert_eq!(stored[1].product, "Cola");
    assert_eq!(stored[1].quantity, 0);
    assert_eq!(stored[1].amount, Money::ZERO);

    for r in &stored {
        assert_eq!(r.ts_utc, now);
        assert_eq!(r.latitude, "12.9716");
        assert_eq!(r.longitude, "77.5946");
    }
}

#[test]
fn scenario_second_submission_appends_without_touching_the_first() {
    let snap = CatalogSnapshot::load(&SnackSource).unwrap();
    let mut draft = OrderDraft::new();
    draft.select_retailer("Corner Mart");
    draft.select_category(&snap, "Snacks");

    let now: DateTime<Utc> = "2026-08-08T10:00:00Z".parse().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("submissions.jsonl");
    let mut sink = JsonlSink::new(&path).unwrap();

    let first = build_submission(&snap, &draft, None, now).unwrap();
    deliver(&mut sink, &first).unwrap();
    let second = build_submission(&snap, &draft, None, now).unwrap();
    deliver(&mut sink, &second).unwrap();

    let stored = read_all(&path).unwrap();
    assert_eq!(stored.len(), 4);
    assert_eq!(&stored[..2], &first[..]);
    assert_eq!(&stored[2..], &second[..]);

    // Resubmission regenerated every id; duplicates by content are
    // accepted, duplicates by id never occur.
    let mut ids: Vec<_> = stored.iter().map(|r| r.record_id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}
