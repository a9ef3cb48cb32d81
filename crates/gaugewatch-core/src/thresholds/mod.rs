//! Threshold checking for gaugewatch
//!
//! Builds a lookup over the configured measurement types, evaluates readings
//! against it and hands violations to a side-channel reporter.

mod checker;
mod index;
mod reporter;

pub use checker::{CheckOutcome, ThresholdChecker};
pub use index::ThresholdIndex;
pub use reporter::{LineReporter, ViolationReporter};
