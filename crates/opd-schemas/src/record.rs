//! Persistent submission types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// A captured latitude/longitude pair.
///
/// Coordinates are carried as the strings supplied by the capture layer;
/// the core never does arithmetic on them. An absent capture is represented
/// by the caller passing no `Geolocation` at all — [`Geolocation::origin`]
/// is what gets recorded in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geolocation {
    pub latitude: String,
    pub longitude: String,
}

impl Geolocation {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// The `("0", "0")` pair recorded when no capture is available.
    pub fn origin() -> Self {
        Self::new("0", "0")
    }
}

/// One persisted order line.
///
/// Produced by the submission builder at commit time, one per product
/// offered in the selected category (zero-quantity lines included).
/// Immutable once created; every record of one batch shares the same
/// `ts_utc` and latitude/longitude pair, while `record_id` is freshly
/// generated per record and never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub record_id: Uuid,
    pub retailer: String,
    pub salesperson: String,
    pub team: String,
    pub email: String,
    pub category: String,
    pub product: String,
    pub quantity: u32,
    pub amount: Money,
    pub latitude: String,
    pub longitude: String,
    pub ts_utc: DateTime<Utc>,
}
