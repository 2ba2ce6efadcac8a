// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Nanosecond timestamp rendering.

use chrono::{DateTime, Utc};

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Formats nanoseconds since the Unix epoch as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
///
/// Sub-millisecond digits are truncated. Negative inputs are split with floor
/// division, so `-1` renders as `1969-12-31T23:59:59.999Z`.
pub fn format_timestamp_ns(ns: i64) -> String {
    let secs = ns.div_euclid(NANOS_PER_SEC);
    let nanos = ns.rem_euclid(NANOS_PER_SEC) as u32;
    match DateTime::<Utc>::from_timestamp(secs, nanos) {
        Some(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        // Unreachable for i64 nanoseconds, which span roughly ±292 years.
        None => format!("{ns}ns"),
    }
}
