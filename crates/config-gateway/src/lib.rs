// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # config-gateway
//!
//! Reads and writes the `simtemp` device's sysfs attributes.
//!
//! # Attributes
//! - **`sampling_ms`**: sampling period in milliseconds (read/write).
//! - **`threshold`**: alert threshold in milli-°C (read/write).
//! - **`mode`**: simulation profile: `normal`, `noisy`, `ramp` (read/write).
//! - **`stats`**: update/alert counters and last reading (read-only).
//!
//! # Failure Policy
//! Writes are fatal: a failed write means the requested configuration did
//! not take effect, so the error is returned with the attribute path and
//! attempted value. Reading back the sampling period never fails; a missing,
//! unparseable, or non-positive value is replaced by the gateway's default
//! period.
//!
//! # Example
//! ```no_run
//! use config_gateway::{Attribute, ConfigGateway};
//!
//! let gw = ConfigGateway::new("/sys/class/simtemp_class/simtemp");
//! gw.apply(Attribute::Threshold, 45_000).expect("threshold write failed");
//! println!("period: {} ms", gw.read_effective_period());
//! ```

mod attribute;
mod error;
mod gateway;
mod mode;
mod stats;

pub use attribute::Attribute;
pub use error::GatewayError;
pub use gateway::{ConfigGateway, DEFAULT_SAMPLING_PERIOD_MS};
pub use mode::SimMode;
pub use stats::DeviceStats;
