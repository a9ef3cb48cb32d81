//! Name lookup over the configured measurement types

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::RequestError;
use crate::models::{MeasurementReading, MeasurementType, Violation};

/// Measurement types in configuration order plus a name lookup.
///
/// Built once from the loaded [`Config`] and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ThresholdIndex {
    types: Vec<MeasurementType>,
    by_name: HashMap<String, usize>,
}

impl ThresholdIndex {
    /// Derive the index from a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.measurement_types.clone())
    }

    /// Build an index over `types`.
    ///
    /// Duplicate names are kept for evaluation; lookup resolves to the first.
    pub fn new(types: Vec<MeasurementType>) -> Self {
        let mut by_name = HashMap::with_capacity(types.len());

        for (position, measurement) in types.iter().enumerate() {
            if by_name.contains_key(&measurement.name) {
                warn!(
                    measurement = %measurement.name,
                    position,
                    "Duplicate measurement type, lookup keeps the first entry"
                );
                continue;
            }

            if measurement.is_inverted() {
                debug!(
                    measurement = %measurement.name,
                    lower = measurement.lower_threshold,
                    upper = measurement.upper_threshold,
                    "Measurement type has a reversed range"
                );
            }

            by_name.insert(measurement.name.clone(), position);
        }

        Self { types, by_name }
    }

    /// Look up a measurement type by exact name
    pub fn get(&self, name: &str) -> Option<&MeasurementType> {
        self.by_name.get(name).map(|&position| &self.types[position])
    }

    /// Measurement types in configuration order
    pub fn iter(&self) -> impl Iterator<Item = &MeasurementType> {
        self.types.iter()
    }

    /// Number of configured entries
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether nothing is configured
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Evaluate a reading against every configured type, in order.
    ///
    /// Absent keys are skipped. The first non-numeric value aborts the whole
    /// evaluation, so callers never see violations from a rejected reading.
    pub fn evaluate(&self, reading: &MeasurementReading) -> Result<Vec<Violation>, RequestError> {
        let mut violations = Vec::new();

        for measurement in &self.types {
            let Some(value) = reading.value_of(&measurement.name)? else {
                continue;
            };

            violations.extend(measurement.check(value));
        }

        Ok(violations)
    }
}
