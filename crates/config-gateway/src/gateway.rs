// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Attribute reads and writes under the device's sysfs directory.
//!
//! The driver accepts plain decimal text on write and reports the effective
//! value (newline-terminated) on read. Files are never created: writing to a
//! missing attribute is an error, exactly as it would be on a real sysfs.

use crate::{Attribute, DeviceStats, GatewayError, SimMode};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sampling period assumed when the `sampling_ms` attribute cannot be read.
pub const DEFAULT_SAMPLING_PERIOD_MS: u32 = 1000;

const MODE_FILE: &str = "mode";
const STATS_FILE: &str = "stats";

/// Handle on one device's sysfs attribute directory.
#[derive(Debug, Clone)]
pub struct ConfigGateway {
    base: PathBuf,
    default_period_ms: u32,
}

impl ConfigGateway {
    /// Creates a gateway rooted at `base`, falling back to
    /// [`DEFAULT_SAMPLING_PERIOD_MS`] on period read-back failures.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self::with_default_period(base, DEFAULT_SAMPLING_PERIOD_MS)
    }

    /// Creates a gateway with an explicit fallback period.
    ///
    /// A fallback of `0` is raised to `1` so the effective period is always positive.
    pub fn with_default_period(base: impl Into<PathBuf>, default_period_ms: u32) -> Self {
        Self {
            base: base.into(),
            default_period_ms: default_period_ms.max(1),
        }
    }

    /// Returns the sysfs directory this gateway operates on.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Returns the period substituted when read-back fails.
    pub fn default_period_ms(&self) -> u32 {
        self.default_period_ms
    }

    /// Returns the full path of an integer attribute.
    pub fn attribute_path(&self, attribute: Attribute) -> PathBuf {
        self.base.join(attribute.file_name())
    }

    /// Returns the path of the `mode` attribute.
    pub fn mode_path(&self) -> PathBuf {
        self.base.join(MODE_FILE)
    }

    /// Returns the path of the `stats` attribute.
    pub fn stats_path(&self) -> PathBuf {
        self.base.join(STATS_FILE)
    }

    /// Writes `value` as decimal text to `attribute`.
    ///
    /// No retry is attempted. The error carries the attribute path and value.
    pub fn apply(&self, attribute: Attribute, value: i32) -> Result<(), GatewayError> {
        let path = self.attribute_path(attribute);
        write_sysfs_file(&path, &value.to_string())?;
        tracing::info!("{attribute} = {value} ({})", path.display());
        Ok(())
    }

    /// Selects the simulation profile.
    pub fn set_mode(&self, mode: SimMode) -> Result<(), GatewayError> {
        let path = self.mode_path();
        write_sysfs_file(&path, mode.as_str())?;
        tracing::info!("mode = {mode} ({})", path.display());
        Ok(())
    }

    /// Reads the current value of an integer attribute.
    pub fn read_attribute(&self, attribute: Attribute) -> Result<i64, GatewayError> {
        let path = self.attribute_path(attribute);
        let content = read_sysfs_file(&path)?;
        content.parse::<i64>().map_err(|_| GatewayError::Parse {
            path: path.display().to_string(),
            detail: format!("expected an integer, got '{content}'"),
        })
    }

    /// Returns the sampling period currently in effect, in milliseconds.
    ///
    /// Never fails: an unreadable, unparseable, or non-positive value is
    /// replaced by the gateway's default period.
    pub fn read_effective_period(&self) -> u32 {
        match self.read_attribute(Attribute::SamplingMs) {
            Ok(ms) if ms > 0 => u32::try_from(ms).unwrap_or_else(|_| {
                tracing::warn!(
                    "sampling period {ms} ms out of range, using {} ms",
                    self.default_period_ms
                );
                self.default_period_ms
            }),
            Ok(ms) => {
                tracing::warn!(
                    "non-positive sampling period {ms} ms, using {} ms",
                    self.default_period_ms
                );
                self.default_period_ms
            }
            Err(e) => {
                tracing::warn!("{e}; using {} ms sampling period", self.default_period_ms);
                self.default_period_ms
            }
        }
    }

    /// Reads the simulation profile currently selected.
    pub fn read_mode(&self) -> Result<SimMode, GatewayError> {
        let path = self.mode_path();
        let content = read_sysfs_file(&path)?;
        content.parse::<SimMode>().map_err(|detail| GatewayError::Parse {
            path: path.display().to_string(),
            detail,
        })
    }

    /// Reads and parses the driver's statistics attribute.
    pub fn read_stats(&self) -> Result<DeviceStats, GatewayError> {
        let path = self.stats_path();
        let content = read_sysfs_file(&path)?;
        DeviceStats::parse(&content).map_err(|detail| GatewayError::Parse {
            path: path.display().to_string(),
            detail,
        })
    }
}

/// Writes `value` to an existing attribute file.
fn write_sysfs_file(path: &Path, value: &str) -> Result<(), GatewayError> {
    let write_error = |source| GatewayError::Write {
        path: path.display().to_string(),
        value: value.to_string(),
        source,
    };
    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(write_error)?;
    file.write_all(value.as_bytes()).map_err(write_error)
}

/// Reads an attribute file and returns its trimmed content.
fn read_sysfs_file(path: &Path) -> Result<String, GatewayError> {
    if !path.exists() {
        return Err(GatewayError::NotAvailable {
            path: path.display().to_string(),
        });
    }
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| GatewayError::Read {
            path: path.display().to_string(),
            source: e,
        })
}
