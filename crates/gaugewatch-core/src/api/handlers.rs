//! API handlers for the HTTP API

use std::sync::Arc;

use axum::extract::State;
use tracing::debug;

use crate::error::RequestError;
use crate::thresholds::ThresholdChecker;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Checker over the loaded configuration
    pub checker: Arc<ThresholdChecker>,
}

/// Check a JSON reading against the configured thresholds.
///
/// Answers `200 OK` whether or not anything was violated; violations only go
/// to the side-channel. A malformed body or non-numeric configured field
/// answers `400` with the error text.
pub async fn check_thresholds(
    State(state): State<AppState>,
    body: String,
) -> Result<&'static str, RequestError> {
    let outcome = state.checker.check(&body).map_err(|e| {
        debug!(error = %e, "Rejected reading");
        e
    })?;

    debug!(
        request_id = %outcome.request_id,
        violations = outcome.violations.len(),
        "Reading accepted"
    );

    Ok("OK")
}
