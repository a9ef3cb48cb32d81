//! Configuration management for gaugewatch
//!
//! The configuration document names the measurement types to watch and the
//! administrative contact. Optional `server` and `logging` sections tune the
//! process and fall back to defaults when absent.

use std::path::Path;

use ::config::{File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::ConfigLoadError;
use crate::models::MeasurementType;

/// Conventional configuration file name, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Main configuration struct. Read once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Administrative contact. Not used for delivery.
    pub email: String,

    /// Watched measurement types, in file order
    #[serde(alias = "measurementtypes")]
    pub measurement_types: Vec<MeasurementType>,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load the configuration file at `path`.
    ///
    /// The format follows the extension (`yaml`/`yml`, `json`, `toml`); a file
    /// without an extension is read as YAML. Threshold ordering and ranges are
    /// not validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let format = file_format(path)?;

        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::from_io(path, e))?;

        Self::parse(&contents, format).map_err(|source| ConfigLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a configuration document held in memory.
    ///
    /// `config` reads the document untyped; the typed pass is strict, so a
    /// boolean, string or sequence where a number belongs is rejected rather
    /// than coerced.
    pub fn parse(contents: &str, format: FileFormat) -> Result<Self, ::config::ConfigError> {
        let document: serde_json::Value = ::config::Config::builder()
            .add_source(File::from_str(contents, format))
            .build()?
            .try_deserialize()?;

        serde_json::from_value(document).map_err(|e| ::config::ConfigError::Foreign(Box::new(e)))
    }
}

fn file_format(path: &Path) -> Result<FileFormat, ConfigLoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        None | Some("yaml" | "yml") => Ok(FileFormat::Yaml),
        Some("json") => Ok(FileFormat::Json),
        Some("toml") => Ok(FileFormat::Toml),
        Some(_) => Err(ConfigLoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// HTTP port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4567,
        }
    }
}

impl ServerConfig {
    /// Socket address string for the listener
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level, used when `RUST_LOG` is unset
    pub level: String,
    /// Log format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SAMPLE: &str = r"
email: ops@example.com
measurementTypes:
  - name: heartRate
    lowerThreshold: 60
    upperThreshold: 100
  - name: temperature
    lowerThreshold: 35.5
    upperThreshold: 38.0
";

    fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_yaml_document() {
        let config = Config::parse(SAMPLE, FileFormat::Yaml).unwrap();

        assert_eq!(config.email, "ops@example.com");
        assert_eq!(
            config.measurement_types,
            vec![
                MeasurementType::new("heartRate", 60.0, 100.0),
                MeasurementType::new("temperature", 35.5, 38.0),
            ]
        );
    }

    #[test]
    fn test_optional_sections_default() {
        let config = Config::parse(SAMPLE, FileFormat::Yaml).unwrap();

        assert_eq!(config.server.addr(), "0.0.0.0:4567");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_optional_sections_override() {
        let doc = format!("{SAMPLE}server:\n  port: 8080\nlogging:\n  format: json\n");
        let config = Config::parse(&doc, FileFormat::Yaml).unwrap();

        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_reversed_and_negative_ranges_are_accepted() {
        let doc = r"
email: ''
measurementTypes:
  - name: power
    lowerThreshold: 10
    upperThreshold: -5
";
        let config = Config::parse(doc, FileFormat::Yaml).unwrap();
        assert!(config.measurement_types[0].is_inverted());
    }

    #[test]
    fn test_missing_email_is_rejected() {
        let doc = "measurementTypes: []\n";
        assert!(Config::parse(doc, FileFormat::Yaml).is_err());
    }

    #[test]
    fn test_missing_threshold_is_rejected() {
        let doc = r"
email: ops@example.com
measurementTypes:
  - name: heartRate
    lowerThreshold: 60
";
        assert!(Config::parse(doc, FileFormat::Yaml).is_err());
    }

    #[test]
    fn test_non_numeric_threshold_is_rejected() {
        let doc = r"
email: ops@example.com
measurementTypes:
  - name: heartRate
    lowerThreshold: low
    upperThreshold: 100
";
        assert!(Config::parse(doc, FileFormat::Yaml).is_err());
    }

    #[test]
    fn test_boolean_threshold_is_rejected() {
        let doc = r"
email: ops@example.com
measurementTypes:
  - name: heartRate
    lowerThreshold: true
    upperThreshold: 100
";
        assert!(Config::parse(doc, FileFormat::Yaml).is_err());
    }

    #[test]
    fn test_quoted_threshold_is_rejected() {
        let doc = r"
email: ops@example.com
measurementTypes:
  - name: heartRate
    lowerThreshold: '60'
    upperThreshold: 100
";
        assert!(Config::parse(doc, FileFormat::Yaml).is_err());
    }

    #[test]
    fn test_structured_threshold_is_rejected() {
        for threshold in ["[60, 70]", "{ value: 60 }"] {
            let doc = format!(
                "email: ops@example.com\nmeasurementTypes:\n  - name: heartRate\n    lowerThreshold: {threshold}\n    upperThreshold: 100\n"
            );
            assert!(Config::parse(&doc, FileFormat::Yaml).is_err(), "{threshold} should be rejected");
        }
    }

    #[test]
    fn test_numeric_name_is_rejected() {
        let doc = r"
email: ops@example.com
measurementTypes:
  - name: 7
    lowerThreshold: 60
    upperThreshold: 100
";
        assert!(Config::parse(doc, FileFormat::Yaml).is_err());
    }

    #[test]
    fn test_numeric_email_is_rejected() {
        let doc = r"
email: 123
measurementTypes:
  - name: heartRate
    lowerThreshold: 60
    upperThreshold: 100
";
        assert!(Config::parse(doc, FileFormat::Yaml).is_err());
    }

    #[test]
    fn test_load_boolean_threshold_is_parse_error() {
        let file = write_config(
            ".yaml",
            "email: ops@example.com\nmeasurementTypes:\n  - name: hr\n    lowerThreshold: true\n    upperThreshold: 100\n",
        );
        let err = Config::load(file.path()).unwrap_err();

        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(".yaml", SAMPLE);
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.measurement_types.len(), 2);
    }

    #[test]
    fn test_load_json_file() {
        let file = write_config(
            ".json",
            r#"{"email": "ops@example.com", "measurementTypes": [{"name": "heartRate", "lowerThreshold": 60, "upperThreshold": 100}]}"#,
        );
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.measurement_types[0].name, "heartRate");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("config.yaml")).unwrap_err();

        assert!(matches!(err, ConfigLoadError::NotFound { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let file = write_config(".yaml", "email: [unterminated\n");
        let err = Config::load(file.path()).unwrap_err();

        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let file = write_config(".ini", "email = x\n");
        let err = Config::load(file.path()).unwrap_err();

        assert!(matches!(err, ConfigLoadError::UnsupportedFormat { .. }));
    }
}
