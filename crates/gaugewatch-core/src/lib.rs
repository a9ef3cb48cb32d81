//! # gaugewatch
//!
//! Threshold checker for named measurements.
//!
//! A YAML document lists measurement types, each with a lower and an upper
//! threshold. The service accepts JSON readings on `POST /`, compares every
//! configured measurement present in the reading against its range and
//! prints one line per violation on standard output.
//!
//! ## Architecture
//!
//! - **Config**: measurement types loaded once at startup
//! - **Thresholds**: name lookup, evaluation and the violation side-channel
//! - **API**: the single HTTP endpoint
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve with ./config.yaml
//! gaugewatch serve
//!
//! # Check a reading without a server
//! echo '{"heartRate": 45}' | gaugewatch check
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod thresholds;

pub use config::Config;
pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::api::HttpServer;
    pub use crate::config::Config;
    pub use crate::error::{ConfigLoadError, Error, RequestError, Result};
    pub use crate::models::*;
    pub use crate::thresholds::{LineReporter, ThresholdChecker, ThresholdIndex, ViolationReporter};
}
