//! Shared value types for the OrderPad workspace.
//!
//! This crate holds only the types that cross crate boundaries: the
//! fixed-point [`Money`] amount, the [`Geolocation`] pair, and the
//! persistent [`SubmissionRecord`] DTO. No IO, no business logic.

pub mod money;
pub mod record;

pub use money::{Money, MoneyParseError};
pub use record::{Geolocation, SubmissionRecord};
