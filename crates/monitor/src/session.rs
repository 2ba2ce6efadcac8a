// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! One end-to-end monitoring session.
//!
//! ```text
//! Session::configure   sampling → threshold → mode → (test) forced threshold
//! Session::run         read period → open device → poll loop / self-test
//! ```
//!
//! Any write failure stops the session before the device is opened. The
//! device is released when [`Session::run`] returns, whatever the outcome.

use crate::{
    LoopEvent, LoopReport, MonitorConfig, MonitorError, PollLoop, PollReadiness, SensorDevice,
    TestRun, TestValidator, TEST_THRESHOLD_MILLI_C,
};
use config_gateway::{Attribute, ConfigGateway, SimMode};
use std::os::fd::AsFd;
use std::path::PathBuf;

/// A configuration write that took effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// A user-requested integer attribute.
    Setting {
        attribute: Attribute,
        value: i32,
        path: PathBuf,
    },
    /// A user-requested simulation profile.
    Mode { mode: SimMode, path: PathBuf },
    /// The self-test's forced low threshold.
    TestThreshold { value: i32, path: PathBuf },
}

/// How a session ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Continuous monitoring stopped (only reachable with a bounded loop).
    Completed(LoopReport),
    /// The self-test ran to its period limit.
    Test(TestRun),
}

impl SessionOutcome {
    /// Returns the loop counters.
    pub fn report(&self) -> &LoopReport {
        match self {
            SessionOutcome::Completed(report) => report,
            SessionOutcome::Test(run) => &run.report,
        }
    }
}

/// Drives configuration and monitoring for one [`MonitorConfig`].
#[derive(Debug, Clone)]
pub struct Session {
    config: MonitorConfig,
    gateway: ConfigGateway,
}

impl Session {
    /// Creates a session from the given configuration.
    pub fn new(config: MonitorConfig) -> Self {
        let gateway = config.gateway();
        Self { config, gateway }
    }

    /// Returns the session's configuration.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Returns the sysfs gateway.
    pub fn gateway(&self) -> &ConfigGateway {
        &self.gateway
    }

    /// Applies every requested write, reporting each one as it succeeds.
    ///
    /// Stops at the first failure.
    pub fn configure<F>(&self, mut on_applied: F) -> Result<(), MonitorError>
    where
        F: FnMut(&Applied),
    {
        let gw = &self.gateway;

        if let Some(value) = self.config.sampling_ms {
            gw.apply(Attribute::SamplingMs, value)?;
            on_applied(&Applied::Setting {
                attribute: Attribute::SamplingMs,
                value,
                path: gw.attribute_path(Attribute::SamplingMs),
            });
        }

        if let Some(value) = self.config.threshold_milli_c {
            gw.apply(Attribute::Threshold, value)?;
            on_applied(&Applied::Setting {
                attribute: Attribute::Threshold,
                value,
                path: gw.attribute_path(Attribute::Threshold),
            });
        }

        if let Some(mode) = self.config.mode {
            gw.set_mode(mode)?;
            on_applied(&Applied::Mode {
                mode,
                path: gw.mode_path(),
            });
        }

        if self.config.test {
            TestValidator::arm(gw)?;
            on_applied(&Applied::TestThreshold {
                value: TEST_THRESHOLD_MILLI_C,
                path: gw.attribute_path(Attribute::Threshold),
            });
        }

        Ok(())
    }

    /// Opens the device and runs the poll loop.
    ///
    /// In test mode the loop is bounded and judged by the [`TestValidator`];
    /// otherwise it runs until a fatal error.
    pub fn run<F>(&self, on_event: F) -> Result<SessionOutcome, MonitorError>
    where
        F: FnMut(&LoopEvent),
    {
        self.run_with(PollLoop::for_period(self.gateway.read_effective_period()), on_event)
    }

    /// Like [`Session::run`] with an explicit loop, e.g. a bounded one.
    pub fn run_with<F>(&self, poll_loop: PollLoop, on_event: F) -> Result<SessionOutcome, MonitorError>
    where
        F: FnMut(&LoopEvent),
    {
        let device = SensorDevice::open(&self.config.device_path)?;
        tracing::info!(
            "monitoring {} (timeout {} ms{})",
            device.path().display(),
            poll_loop.timeout().as_millis(),
            if self.config.test { ", self-test" } else { "" },
        );

        let mut readiness = PollReadiness::new();
        let mut reader = &device;

        let outcome = if self.config.test {
            let run = TestValidator::new(poll_loop).run(
                &mut readiness,
                device.as_fd(),
                &mut reader,
                on_event,
            )?;
            SessionOutcome::Test(run)
        } else {
            let report = poll_loop.run(&mut readiness, device.as_fd(), &mut reader, on_event)?;
            SessionOutcome::Completed(report)
        };

        tracing::info!("session finished: {}", outcome.report().summary());
        Ok(outcome)
    }
}
