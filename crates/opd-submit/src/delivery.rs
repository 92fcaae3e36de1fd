//! Batch delivery with indeterminate-outcome reporting.

use std::fmt;

use uuid::Uuid;

use opd_schemas::SubmissionRecord;

use crate::sink::{SinkError, SubmissionSink};

/// Successful delivery of a whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Number of records appended (equals the batch size).
    pub appended: usize,
}

/// A sink failure part-way through a batch.
///
/// Appends already made are NOT rolled back — the sink has no
/// transactional API — so the caller must treat the submission outcome as
/// indeterminate: some lines may have been recorded. Resubmitting builds
/// a fresh batch with new record ids, which can duplicate the lines that
/// did land; that is accepted behavior, not a defect.
#[derive(Debug)]
pub struct DeliveryError {
    /// Records appended before the failure.
    pub appended: usize,
    /// Size of the batch that was being delivered.
    pub batch_size: usize,
    /// Id of the record whose append failed.
    pub failed_record: Uuid,
    pub source: SinkError,
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "submission outcome indeterminate: {} of {} records were appended \
             before record {} failed ({}); appended records remain in the sink",
            self.appended, self.batch_size, self.failed_record, self.source
        )
    }
}

impl std::error::Error for DeliveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Append `records` to `sink` one at a time, in build order.
///
/// Stops at the first failed append and reports how far delivery got.
/// No automatic retry: whether to re-offer submission is the caller's
/// decision.
pub fn deliver(
    sink: &mut dyn SubmissionSink,
    records: &[SubmissionRecord],
) -> Result<DeliveryReceipt, DeliveryError> {
    for (i, record) in records.iter().enumerate() {
        if let Err(source) = sink.append(record) {
            return Err(DeliveryError {
                appended: i,
                batch_size: records.len(),
                failed_record: record.record_id,
                source,
            });
        }
    }
    Ok(DeliveryReceipt {
        appended: records.len(),
    })
}
