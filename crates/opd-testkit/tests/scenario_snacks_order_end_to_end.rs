use chrono::{DateTime, Utc};

use opd_order::{recompute, OrderDraft};
use opd_schemas::{Geolocation, Money};
use opd_submit::{build_submission, deliver};
use opd_testkit::{fixture_snapshot, MemorySink};

#[test]
fn scenario_snacks_quantities_compute_and_submit_end_to_end() {
    // GIVEN the Snacks category with Chips at 20.00 and Cola at 15.00
    let snap = fixture_snapshot();
    let mut draft = OrderDraft::new();
    draft.select_retailer("Corner Mart");
    draft.select_category(&snap, "Snacks");

    // WHEN the salesperson enters Chips = 3 and leaves Cola untouched
    let chips = draft.lines()[0].product_id;
    assert!(draft.set_quantity_input(chips, Some("3")));

    // THEN the live totals read 60.00 / 0.00 with a 60.00 category total
    let totals = recompute(&draft);
    assert_eq!(totals.line_amounts, vec![Money::from_units(60), Money::ZERO]);
    assert_eq!(totals.category_total.to_string(), "60.00");

    // WHEN the order is submitted with a captured geolocation
    let now: DateTime<Utc> = "2026-08-08T10:15:00Z".parse().unwrap();
    let geo = Geolocation::new("12.9716", "77.5946");
    let records = build_submission(&snap, &draft, Some(&geo), now).unwrap();

    let mut sink = MemorySink::new();
    let receipt = deliver(&mut sink, &records).unwrap();

    // THEN two records land — one per offered product — sharing one
    // timestamp and one geolocation pair
    assert_eq!(receipt.appended, 2);
    let stored = sink.records();
    assert_eq!(stored.len(), 2);

    assert_eq!(stored[0].product, "Chips");
    assert_eq!(stored[0].quantity, 3);
    assert_eq!(stored[0].amount, Money::from_units(60));

    assert_eq!(stored[1].product, "Cola");
    assert_eq!(stored[1].quantity, 0);
    assert_eq!(stored[1].amount, Money::ZERO);

    for r in stored {
        assert_eq!(r.ts_utc, now);
        assert_eq!(r.latitude, "12.9716");
        assert_eq!(r.longitude, "77.5946");
        assert_eq!(r.salesperson, "Asha");
        assert_eq!(r.team, "North");
        assert_eq!(r.email, "asha@example.com");
    }
}
