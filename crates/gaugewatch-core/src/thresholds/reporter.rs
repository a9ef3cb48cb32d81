//! Side-channel output for threshold violations

use std::io::{self, Write};

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use tracing::{error, warn};
use uuid::Uuid;

use crate::models::Violation;

/// Receives the violations of one accepted reading.
///
/// Never told about rejected readings, and never affects the response.
pub trait ViolationReporter: Send + Sync {
    /// Report the violations found for `request_id`
    fn report(&self, request_id: Uuid, violations: &[Violation]);
}

/// Writes one text line per violation.
///
/// Lines of one report are written under a single lock; lines from
/// concurrent reports may interleave between reports but are never torn.
pub struct LineReporter<W> {
    out: Mutex<W>,
}

impl LineReporter<io::Stdout> {
    /// Reporter over standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> LineReporter<W> {
    /// Create a reporter over any writer
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn write_lines(&self, request_id: Uuid, violations: &[Violation]) -> io::Result<()> {
        let observed_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut out = self.out.lock();

        for violation in violations {
            writeln!(out, "{observed_at} [{request_id}] {violation}")?;
        }

        out.flush()
    }
}

impl<W: Write + Send> ViolationReporter for LineReporter<W> {
    fn report(&self, request_id: Uuid, violations: &[Violation]) {
        for violation in violations {
            warn!(
                %request_id,
                measurement = %violation.name,
                value = violation.value,
                bound = %violation.bound,
                threshold = violation.bound_value,
                "Threshold violated"
            );
        }

        if let Err(e) = self.write_lines(request_id, violations) {
            error!(%request_id, error = %e, "Failed to write violation report");
        }
    }
}
