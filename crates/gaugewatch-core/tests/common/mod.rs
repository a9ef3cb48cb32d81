//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use gaugewatch::api::{create_router, AppState};
use gaugewatch::models::{MeasurementType, Violation};
use gaugewatch::thresholds::{ThresholdChecker, ThresholdIndex, ViolationReporter};
use parking_lot::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

/// Reporter that keeps every report in memory.
#[derive(Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<(Uuid, Vec<Violation>)>>,
}

impl RecordingReporter {
    /// Every violation reported so far, flattened in report order.
    pub fn violations(&self) -> Vec<Violation> {
        self.reports
            .lock()
            .iter()
            .flat_map(|(_, violations)| violations.clone())
            .collect()
    }

    /// Number of reports received.
    pub fn report_count(&self) -> usize {
        self.reports.lock().len()
    }
}

impl ViolationReporter for RecordingReporter {
    fn report(&self, request_id: Uuid, violations: &[Violation]) {
        self.reports.lock().push((request_id, violations.to_vec()));
    }
}

/// Measurement types matching the sample `config.yaml`.
pub fn sample_types() -> Vec<MeasurementType> {
    vec![
        MeasurementType::new("heartRate", 60.0, 100.0),
        MeasurementType::new("temperature", 35.5, 38.0),
        MeasurementType::new("power", 0.0, 5000.0),
    ]
}

/// Build a router over `types` together with the reporter it writes to.
pub fn build_test_app_with(types: Vec<MeasurementType>) -> (Router, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::default());
    let checker = ThresholdChecker::new(ThresholdIndex::new(types), reporter.clone());
    let router = create_router(AppState {
        checker: Arc::new(checker),
    });
    (router, reporter)
}

/// Build a router over the sample measurement types.
pub fn build_test_app() -> (Router, Arc<RecordingReporter>) {
    build_test_app_with(sample_types())
}

/// Send a POST with `body` to `uri`.
pub async fn post(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
