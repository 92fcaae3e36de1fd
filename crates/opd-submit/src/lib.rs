//! Submission building and delivery.
//!
//! Turns a completed draft into a validated batch of uniquely-identified
//! [`opd_schemas::SubmissionRecord`]s and hands them, one append at a
//! time, to a [`SubmissionSink`]. Validation failures produce zero
//! records; a sink failure mid-batch is surfaced as an
//! indeterminate-outcome error, never silently swallowed and never
//! retried here.

pub mod builder;
pub mod delivery;
pub mod sink;

pub use builder::{build_submission, ValidationError};
pub use delivery::{deliver, DeliveryError, DeliveryReceipt};
pub use sink::{read_all, JsonlSink, SinkError, SubmissionSink};
