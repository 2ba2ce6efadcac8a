// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # monitor
//!
//! Consumes the `simtemp` sample stream and classifies each sample as normal
//! or alert.
//!
//! The monitor takes:
//! - A [`ConfigGateway`](config_gateway::ConfigGateway) for the sysfs attributes.
//! - A [`SensorDevice`] opened non-blocking on the character device.
//! - A [`Readiness`] implementation ([`PollReadiness`] in production).
//!
//! And runs a single-threaded [`PollLoop`] that waits for readiness with a
//! timeout of 1.2 sampling periods, drains one 12-byte record per ready
//! event, and tags each record as an alert iff the event carried the
//! priority flag.
//!
//! # Session Flow
//! ```text
//! configure (sysfs writes) → read effective period → open device → poll loop
//!                                                                    │
//!                                          continuous ◄──────────────┤
//!                                 bounded self-test (2 periods) ◄────┘
//! ```
//!
//! In self-test mode the [`TestValidator`] forces a low threshold and
//! reports [`TestVerdict::Pass`] iff an alert is observed before the
//! period limit.

mod config;
mod device;
mod error;
#[cfg(test)]
mod fakes;
mod poll_loop;
mod readiness;
mod report;
mod session;
mod validator;

pub use config::{MonitorConfig, DEFAULT_DEVICE_PATH, DEFAULT_SYSFS_PATH};
pub use device::SensorDevice;
pub use error::MonitorError;
pub use poll_loop::{timeout_for_period, LoopEvent, LoopMode, PollLoop};
pub use readiness::{PollReadiness, ReadyEvent, ReadyFlags, Readiness};
pub use report::LoopReport;
pub use session::{Applied, Session, SessionOutcome};
pub use validator::{
    run_test, TestOutcome, TestRun, TestValidator, TestVerdict, TEST_MAX_PERIODS,
    TEST_THRESHOLD_MILLI_C,
};
