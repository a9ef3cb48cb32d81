//! Incoming measurement readings

use serde_json::{Map, Value};

use crate::error::RequestError;

/// A flat JSON object of measurement name to observed value.
///
/// Lives for one request. Keys that no measurement type names are kept but
/// never looked at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementReading {
    values: Map<String, Value>,
}

impl MeasurementReading {
    /// Parse a request body. Anything but a JSON object is rejected.
    pub fn parse(body: &str) -> Result<Self, RequestError> {
        let values: Map<String, Value> = serde_json::from_str(body)?;
        Ok(Self { values })
    }

    /// Numeric value for `name`.
    ///
    /// `Ok(None)` when the key is absent; an error when it is present but not a number.
    pub fn value_of(&self, name: &str) -> Result<Option<f64>, RequestError> {
        let Some(value) = self.values.get(name) else {
            return Ok(None);
        };

        value
            .as_f64()
            .map(Some)
            .ok_or_else(|| RequestError::evaluation(name, json_kind(value)))
    }

    /// Number of fields in the reading
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the reading has no fields
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for MeasurementReading {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
