//! Per-request threshold check

use std::sync::Arc;

use tracing::{debug, debug_span};
use uuid::Uuid;

use crate::error::RequestError;
use crate::models::{MeasurementReading, Violation};

use super::index::ThresholdIndex;
use super::reporter::ViolationReporter;

/// Result of an accepted reading
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    /// Id printed on every report line of this check
    pub request_id: Uuid,
    /// Violations found, in configuration order
    pub violations: Vec<Violation>,
}

/// Checks request bodies against the configured thresholds.
///
/// Holds no per-request state; one instance serves every request.
pub struct ThresholdChecker {
    index: ThresholdIndex,
    reporter: Arc<dyn ViolationReporter>,
}

impl ThresholdChecker {
    /// Create a checker
    pub fn new(index: ThresholdIndex, reporter: Arc<dyn ViolationReporter>) -> Self {
        Self { index, reporter }
    }

    /// The measurement types being checked
    pub fn index(&self) -> &ThresholdIndex {
        &self.index
    }

    /// Parse and evaluate one body, then report its violations.
    ///
    /// Nothing is reported unless the whole body evaluates cleanly.
    pub fn check(&self, body: &str) -> Result<CheckOutcome, RequestError> {
        let request_id = Uuid::new_v4();

        debug_span!("threshold_check", %request_id).in_scope(|| -> Result<_, RequestError> {
            let reading = MeasurementReading::parse(body)?;
            let violations = self.index.evaluate(&reading)?;

            debug!(
                fields = reading.len(),
                violations = violations.len(),
                "Reading evaluated"
            );

            if !violations.is_empty() {
                self.reporter.report(request_id, &violations);
            }

            Ok(CheckOutcome {
                request_id,
                violations,
            })
        })
    }
}
