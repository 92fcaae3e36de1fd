//! Test support: a deterministic fixture catalog and in-memory sinks.
//!
//! Consumed as a dev-dependency by scenario tests across the workspace;
//! nothing here belongs in a production build.

use opd_catalog::{
    CatalogError, CatalogSnapshot, CatalogSource, RawCategory, RawProduct, RawRetailer,
};
use opd_schemas::SubmissionRecord;
use opd_submit::{SinkError, SubmissionSink};

/// In-memory catalog source with deterministic content:
///
/// - retailers: `Corner Mart` (complete salesperson identity) and
///   `Depot` (blank team, for validation scenarios);
/// - categories: `Snacks`, `Beverages`, and `Empty` (no products);
/// - products: the snacks pair (`Chips` 20.00, `Cola` 15.00), plus two
///   distinct `Cola` products across categories to pin id-keyed lookup.
pub struct FixtureSource;

impl CatalogSource for FixtureSource {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn fetch_retailers(&self) -> Result<Vec<RawRetailer>, CatalogError> {
        Ok(vec![
            RawRetailer {
                name: "Corner Mart".to_string(),
                salesperson: "Asha".to_string(),
                team: "North".to_string(),
                email: "asha@example.com".to_string(),
            },
            RawRetailer {
                name: "Depot".to_string(),
                salesperson: "Ravi".to_string(),
                team: "".to_string(),
                email: "ravi@example.com".to_string(),
            },
        ])
    }

    fn fetch_categories(&self) -> Result<Vec<RawCategory>, CatalogError> {
        Ok(["Snacks", "Beverages", "Empty"]
            .map(|n| RawCategory {
                name: n.to_string(),
            })
            .into_iter()
            .collect())
    }

    fn fetch_products(&self) -> Result<Vec<RawProduct>, CatalogError> {
        let rows = [
            ("Chips", "Snacks", "20.00"),
            ("Cola", "Snacks", "15.00"),
            ("Juice", "Beverages", "35.50"),
            // Same display name as the snacks Cola; distinct product.
            ("Cola", "Beverages", "18.00"),
        ];
        Ok(rows
            .map(|(name, category, price)| RawProduct {
                name: name.to_string(),
                category: category.to_string(),
                price: price.to_string(),
            })
            .into_iter()
            .collect())
    }
}

/// Load the fixture catalog into a snapshot.
pub fn fixture_snapshot() -> CatalogSnapshot {
    CatalogSnapshot::load(&FixtureSource).expect("fixture catalog is valid")
}

/// Sink that records every append in memory.
#[derive(Default)]
pub struct MemorySink {
    records: Vec<SubmissionRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SubmissionRecord] {
        &self.records
    }
}

impl SubmissionSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn append(&mut self, record: &SubmissionRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Sink that accepts `fail_after` appends, then fails every subsequent
/// one while keeping what already landed.
pub struct FailingSink {
    fail_after: usize,
    records: Vec<SubmissionRecord>,
}

impl FailingSink {
    pub fn new(fail_after: usize) -> Self {
        Self {
            fail_after,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[SubmissionRecord] {
        &self.records
    }
}

impl SubmissionSink for FailingSink {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn append(&mut self, record: &SubmissionRecord) -> Result<(), SinkError> {
        if self.records.len() >= self.fail_after {
            return Err(SinkError::Io("injected append failure".to_string()));
        }
        self.records.push(record.clone());
        Ok(())
    }
}
