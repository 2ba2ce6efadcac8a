// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Decoded sensor samples.

use crate::format_timestamp_ns;

/// A single temperature reading as delivered by the device.
///
/// Values are taken verbatim from the wire; no range validation is applied.
/// Timestamps are expected to be non-decreasing but this is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Sample {
    /// Nanoseconds since the Unix epoch.
    pub timestamp_ns: i64,
    /// Temperature in thousandths of a degree Celsius. May be negative.
    pub temperature_milli_c: i32,
}

impl Sample {
    /// Creates a sample from raw field values.
    pub fn new(timestamp_ns: i64, temperature_milli_c: i32) -> Self {
        Self {
            timestamp_ns,
            temperature_milli_c,
        }
    }

    /// Returns the temperature in degrees Celsius.
    pub fn celsius(&self) -> f64 {
        f64::from(self.temperature_milli_c) / 1000.0
    }

    /// Returns the timestamp as an ISO-8601 UTC string with millisecond precision.
    pub fn iso_timestamp(&self) -> String {
        format_timestamp_ns(self.timestamp_ns)
    }
}

/// A sample tagged with the alert status of the readiness event that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ClassifiedSample {
    /// The decoded payload.
    pub sample: Sample,
    /// `true` iff the delivering event carried the priority flag.
    pub is_alert: bool,
}

impl ClassifiedSample {
    /// Attaches an alert classification to a decoded sample.
    pub fn new(sample: Sample, is_alert: bool) -> Self {
        Self { sample, is_alert }
    }
}
