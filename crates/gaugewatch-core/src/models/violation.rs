//! Threshold violation model

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the range was crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    /// Value fell below the lower threshold
    Lower,
    /// Value rose above the upper threshold
    Upper,
}

impl Bound {
    /// Direction word used in report lines
    pub fn direction(self) -> &'static str {
        match self {
            Self::Lower => "below",
            Self::Upper => "above",
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lower => f.write_str("lower"),
            Self::Upper => f.write_str("upper"),
        }
    }
}

/// One observed value outside its configured range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Measurement name
    pub name: String,

    /// Observed value
    pub value: f64,

    /// Bound that was crossed
    pub bound: Bound,

    /// Configured value of that bound
    pub bound_value: f64,
}

impl Violation {
    /// Create a violation record
    pub fn new(name: impl Into<String>, value: f64, bound: Bound, bound_value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            bound,
            bound_value,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={} is {} the {} threshold of {}",
            self.name,
            self.value,
            self.bound.direction(),
            self.bound,
            self.bound_value
        )
    }
}
