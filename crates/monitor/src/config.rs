// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Monitor configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! device_path = "/dev/simtemp"
//! sysfs_path = "/sys/class/simtemp_class/simtemp"
//! sampling_ms = 500
//! threshold_milli_c = 45000
//! mode = "noisy"
//! test = false
//! ```
//!
//! Every key is optional. Unset writes are skipped.

use crate::MonitorError;
use config_gateway::{ConfigGateway, SimMode};
use std::path::{Path, PathBuf};

/// Default character device path.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/simtemp";

/// Default sysfs attribute directory.
pub const DEFAULT_SYSFS_PATH: &str = "/sys/class/simtemp_class/simtemp";

/// Configuration for one monitoring session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Character device delivering samples.
    pub device_path: PathBuf,
    /// Directory holding the device's sysfs attributes.
    pub sysfs_path: PathBuf,
    /// Sampling period to write before monitoring, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_ms: Option<i32>,
    /// Alert threshold to write before monitoring, in milli-°C.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_milli_c: Option<i32>,
    /// Simulation profile to select before monitoring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<SimMode>,
    /// Run the bounded alert self-test instead of monitoring continuously.
    pub test: bool,
}

impl MonitorConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, MonitorError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MonitorError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, MonitorError> {
        toml::from_str(toml_str)
            .map_err(|e| MonitorError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, MonitorError> {
        toml::to_string_pretty(self)
            .map_err(|e| MonitorError::Config(format!("TOML serialise error: {e}")))
    }

    /// Creates the sysfs gateway for this configuration.
    pub fn gateway(&self) -> ConfigGateway {
        ConfigGateway::new(&self.sysfs_path)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            device_path: PathBuf::from(DEFAULT_DEVICE_PATH),
            sysfs_path: PathBuf::from(DEFAULT_SYSFS_PATH),
            sampling_ms: None,
            threshold_milli_c: None,
            mode: None,
            test: false,
        }
    }
}
