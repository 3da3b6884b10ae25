//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub serial: SerialConfig,

    #[serde(default)]
    pub influx: InfluxConfig,

    #[serde(default)]
    pub daily: DailyConfig,
}

/// Serial port configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    #[serde(default = "default_device")]
    pub device: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// InfluxDB sink configuration
#[derive(Debug, Deserialize, Clone)]
pub struct InfluxConfig {
    #[serde(default = "default_influx_enabled")]
    pub enabled: bool,

    #[serde(default = "default_influx_url")]
    pub url: String,

    #[serde(default = "default_influx_database")]
    pub database: String,

    #[serde(default = "default_influx_measurement")]
    pub measurement: String,
}

/// Daily consumption reporting configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DailyConfig {
    #[serde(default = "default_daily_enabled")]
    pub enabled: bool,
}

// Default value functions
fn default_device() -> String { "/dev/ttyAMA0".to_string() }
fn default_baud_rate() -> u32 { 9600 }
fn default_timeout_ms() -> u64 { 100 }

fn default_influx_enabled() -> bool { true }
fn default_influx_url() -> String { "http://localhost:8086".to_string() }
fn default_influx_database() -> String { "stromzaehler".to_string() }
fn default_influx_measurement() -> String { "stromzaehler".to_string() }

fn default_daily_enabled() -> bool { true }

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            baud_rate: default_baud_rate(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for InfluxConfig {
    fn default() -> Self {
        Self {
            enabled: default_influx_enabled(),
            url: default_influx_url(),
            database: default_influx_database(),
            measurement: default_influx_measurement(),
        }
    }
}

impl Default for DailyConfig {
    fn default() -> Self {
        Self {
            enabled: default_daily_enabled(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, TOML parsing fails, or
    /// validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.serial.device.is_empty() {
            return Err(crate::error::SmlMeterError::Config(
                toml::de::Error::custom("serial device cannot be empty")
            ));
        }

        if self.serial.baud_rate == 0 {
            return Err(crate::error::SmlMeterError::Config(
                toml::de::Error::custom("baud_rate must be greater than 0")
            ));
        }

        if self.serial.timeout_ms == 0 || self.serial.timeout_ms > 10000 {
            return Err(crate::error::SmlMeterError::Config(
                toml::de::Error::custom("timeout_ms must be between 1 and 10000")
            ));
        }

        if self.influx.enabled {
            if self.influx.url.is_empty() {
                return Err(crate::error::SmlMeterError::Config(
                    toml::de::Error::custom("influx url cannot be empty when enabled")
                ));
            }
            if self.influx.database.is_empty() {
                return Err(crate::error::SmlMeterError::Config(
                    toml::de::Error::custom("influx database cannot be empty when enabled")
                ));
            }
            if self.influx.measurement.is_empty() {
                return Err(crate::error::SmlMeterError::Config(
                    toml::de::Error::custom("influx measurement cannot be empty when enabled")
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.serial.device, "/dev/ttyAMA0");
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.serial.timeout_ms, 100);
        assert!(config.influx.enabled);
        assert_eq!(config.influx.url, "http://localhost:8086");
        assert!(config.daily.enabled);
    }

    #[test]
    fn test_empty_device_rejected() {
        let mut config = Config::default();
        config.serial.device = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_baud_rate_rejected() {
        let mut config = Config::default();
        config.serial.baud_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_bounds() {
        let mut config = Config::default();
        config.serial.timeout_ms = 0;
        assert!(config.validate().is_err());

        config.serial.timeout_ms = 10001;
        assert!(config.validate().is_err());

        config.serial.timeout_ms = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_influx_url_rejected_when_enabled() {
        let mut config = Config::default();
        config.influx.url = String::new();
        assert!(config.validate().is_err());

        config.influx.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[serial]
device = "/dev/ttyUSB0"

[influx]
database = "power"

[daily]
enabled = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.serial.device, "/dev/ttyUSB0");
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.influx.database, "power");
        assert!(!config.daily.enabled);
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(Config::load("/nonexistent/sml-meter.toml").is_err());
    }
}
