//! Data models for gaugewatch

mod measurement;
mod reading;
mod violation;

pub use measurement::*;
pub use reading::*;
pub use violation::*;
