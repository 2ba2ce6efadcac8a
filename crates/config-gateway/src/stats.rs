// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Driver statistics reported by the read-only `stats` attribute.
//!
//! The attribute is a small `key: value` listing:
//! ```text
//! updates: 12
//! alerts: 3
//! last_temp: 25120 mC
//! threshold: 30000 mC
//! ```

/// Counters and last known values kept by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct DeviceStats {
    /// Samples generated since the driver was loaded.
    pub updates: u64,
    /// Samples that were at or above the threshold.
    pub alerts: u64,
    /// Most recent temperature in milli-°C.
    pub last_temp_milli_c: i32,
    /// Threshold in effect, in milli-°C.
    pub threshold_milli_c: i32,
}

impl DeviceStats {
    /// Parses the attribute text. Unknown keys are ignored; every known key is required.
    pub fn parse(content: &str) -> Result<Self, String> {
        let mut updates = None;
        let mut alerts = None;
        let mut last_temp = None;
        let mut threshold = None;

        for line in content.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim().trim_end_matches("mC").trim();
            match key.trim() {
                "updates" => updates = Some(parse_field(key, value)?),
                "alerts" => alerts = Some(parse_field(key, value)?),
                "last_temp" => last_temp = Some(parse_field(key, value)?),
                "threshold" => threshold = Some(parse_field(key, value)?),
                _ => {}
            }
        }

        Ok(Self {
            updates: updates.ok_or("missing 'updates'")?,
            alerts: alerts.ok_or("missing 'alerts'")?,
            last_temp_milli_c: last_temp.ok_or("missing 'last_temp'")?,
            threshold_milli_c: threshold.ok_or("missing 'threshold'")?,
        })
    }

    /// Returns a one-line summary for logging or CLI display.
    pub fn summary(&self) -> String {
        format!(
            "updates={} alerts={} last_temp={:.2}C threshold={:.2}C",
            self.updates,
            self.alerts,
            f64::from(self.last_temp_milli_c) / 1000.0,
            f64::from(self.threshold_milli_c) / 1000.0,
        )
    }
}

fn parse_field<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .parse::<T>()
        .map_err(|_| format!("invalid value '{value}' for '{}'", key.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "updates: 120\nalerts: 7\nlast_temp: -1500 mC\nthreshold: 24000 mC\n";

    #[test]
    fn test_parse() {
        let s = DeviceStats::parse(SAMPLE).unwrap();
        assert_eq!(
            s,
            DeviceStats {
                updates: 120,
                alerts: 7,
                last_temp_milli_c: -1500,
                threshold_milli_c: 24_000,
            }
        );
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let text = format!("{SAMPLE}mode: ramp\n");
        assert!(DeviceStats::parse(&text).is_ok());
    }

    #[test]
    fn test_parse_missing_key() {
        let err = DeviceStats::parse("updates: 1\nalerts: 0\n").unwrap_err();
        assert!(err.contains("last_temp"));
    }

    #[test]
    fn test_summary() {
        let s = DeviceStats::parse(SAMPLE).unwrap();
        assert_eq!(
            s.summary(),
            "updates=120 alerts=7 last_temp=-1.50C threshold=24.00C"
        );
    }
}
