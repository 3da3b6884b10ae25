//! # Measurement Sink Module
//!
//! Forwards decoded measurements to InfluxDB over HTTP.
//!
//! Each measurement becomes one line-protocol point with a millisecond
//! timestamp, POSTed to the database's `/write` endpoint. The sink is thin
//! glue strictly downstream of the decoder; it defines no format of its
//! own beyond the line-protocol rendering.

use crate::error::{Result, SmlMeterError};
use crate::sml::Measurement;
use tracing::{debug, info};

/// InfluxDB line-protocol writer
pub struct InfluxSink {
    client: reqwest::Client,
    write_url: String,
    measurement: String,
}

impl InfluxSink {
    /// Create a sink writing to `<url>/write?db=<database>&precision=ms`
    ///
    /// # Arguments
    ///
    /// * `url` - Base URL of the InfluxDB instance (e.g., "http://localhost:8086")
    /// * `database` - Target database name
    /// * `measurement` - Line-protocol measurement name
    pub fn new(url: &str, database: &str, measurement: &str) -> Self {
        let write_url = format!(
            "{}/write?db={}&precision=ms",
            url.trim_end_matches('/'),
            database
        );
        info!("InfluxDB sink writing to {}", write_url);

        Self {
            client: reqwest::Client::new(),
            write_url,
            measurement: measurement.to_string(),
        }
    }

    /// Render one measurement as an InfluxDB line-protocol point
    ///
    /// Field precision mirrors the meter's resolution: 7 decimals on the
    /// energy counter, 2 on powers, 1 on voltages.
    pub fn to_line_protocol(&self, m: &Measurement) -> String {
        format!(
            "{} count={:.7},power={:.2},power1={:.2},power2={:.2},power3={:.2},volt1={:.1},volt2={:.1},volt3={:.1} {}",
            self.measurement,
            m.energy_count,
            m.power,
            m.power_l1,
            m.power_l2,
            m.power_l3,
            m.voltage_l1,
            m.voltage_l2,
            m.voltage_l3,
            m.timestamp.timestamp_millis(),
        )
    }

    /// POST one measurement to InfluxDB
    ///
    /// # Errors
    ///
    /// Returns [`SmlMeterError::Sink`] if the request fails or the server
    /// answers with an error status
    pub async fn write(&self, m: &Measurement) -> Result<()> {
        let body = self.to_line_protocol(m);
        debug!("Writing point: {}", body);

        let response = self
            .client
            .post(&self.write_url)
            .body(body)
            .send()
            .await
            .map_err(|e| SmlMeterError::Sink(format!("InfluxDB write failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SmlMeterError::Sink(format!(
                "InfluxDB write rejected: HTTP {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_measurement() -> Measurement {
        Measurement {
            energy_count: 12_345.678_901_2,
            power: 1_500.0,
            power_l1: 500.0,
            power_l2: 490.0,
            power_l3: 510.0,
            voltage_l1: 230.1,
            voltage_l2: 229.8,
            voltage_l3: 230.5,
            seconds_index: 86_400,
            timestamp: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
        }
    }

    #[test]
    fn test_line_protocol_format() {
        let sink = InfluxSink::new("http://localhost:8086", "stromzaehler", "stromzaehler");
        let line = sink.to_line_protocol(&sample_measurement());

        assert_eq!(
            line,
            "stromzaehler count=12345.6789012,power=1500.00,power1=500.00,\
             power2=490.00,power3=510.00,volt1=230.1,volt2=229.8,volt3=230.5 \
             1700000000123"
        );
    }

    #[test]
    fn test_line_protocol_negative_power() {
        let sink = InfluxSink::new("http://localhost:8086", "db", "meter");
        let mut m = sample_measurement();
        m.power = -2_500.0;

        let line = sink.to_line_protocol(&m);
        assert!(line.contains("power=-2500.00"));
    }

    #[test]
    fn test_write_url_trims_trailing_slash() {
        let sink = InfluxSink::new("http://localhost:8086/", "db", "meter");
        assert_eq!(sink.write_url, "http://localhost:8086/write?db=db&precision=ms");
    }
}
