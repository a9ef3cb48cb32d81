//! Measurement type model

use serde::{Deserialize, Serialize};

use super::violation::{Bound, Violation};

/// A named metric and its acceptable range.
///
/// Nothing forces `lower_threshold <= upper_threshold`. A reversed range
/// is accepted and every reading then violates at least one bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementType {
    /// Key matched exactly against incoming reading fields
    pub name: String,

    /// Readings strictly below this value violate the range
    // `config` sources may hand keys over case-folded
    #[serde(alias = "lowerthreshold")]
    pub lower_threshold: f64,

    /// Readings strictly above this value violate the range
    #[serde(alias = "upperthreshold")]
    pub upper_threshold: f64,
}

impl MeasurementType {
    /// Create a measurement type
    pub fn new(name: impl Into<String>, lower_threshold: f64, upper_threshold: f64) -> Self {
        Self {
            name: name.into(),
            lower_threshold,
            upper_threshold,
        }
    }

    /// Compare a value against both bounds.
    ///
    /// Both comparisons are strict, so a value equal to a bound is in range.
    /// Yields zero, one or (for a reversed range) two violations.
    pub fn check(&self, value: f64) -> impl Iterator<Item = Violation> {
        let lower = (value < self.lower_threshold)
            .then(|| Violation::new(&self.name, value, Bound::Lower, self.lower_threshold));
        let upper = (value > self.upper_threshold)
            .then(|| Violation::new(&self.name, value, Bound::Upper, self.upper_threshold));

        lower.into_iter().chain(upper)
    }

    /// Whether the configured range is reversed
    pub fn is_inverted(&self) -> bool {
        self.lower_threshold > self.upper_threshold
    }
}
