// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Alert self-test.
//!
//! Forces the device threshold down to [`TEST_THRESHOLD_MILLI_C`] so any
//! plausible simulated reading is above it, then runs the poll loop for
//! [`TEST_MAX_PERIODS`] sampling periods and passes iff an alert-flagged
//! sample was delivered.

use crate::{LoopEvent, LoopReport, MonitorError, PollLoop, Readiness};
use config_gateway::{Attribute, ConfigGateway};
use std::io::Read;

/// Threshold forced during the self-test (24.0 °C).
pub const TEST_THRESHOLD_MILLI_C: i32 = 24_000;

/// Number of sampling periods the self-test waits for an alert.
pub const TEST_MAX_PERIODS: u32 = 2;

/// Result of the self-test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestVerdict {
    /// At least one alert was observed.
    Pass,
    /// No alert within the period limit.
    Fail,
}

impl TestVerdict {
    /// Returns `true` for [`TestVerdict::Pass`].
    pub fn is_pass(self) -> bool {
        matches!(self, TestVerdict::Pass)
    }
}

/// Tracks whether an alert has been seen during one self-test run.
///
/// The flag only ever goes from `false` to `true`; [`TestOutcome::verdict`]
/// consumes the outcome once the loop has ended.
#[derive(Debug, Default)]
pub struct TestOutcome {
    alert_seen: bool,
}

impl TestOutcome {
    /// Creates an outcome with no alert seen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspects one loop event.
    pub fn observe(&mut self, event: &LoopEvent) {
        if let LoopEvent::Sample(sample) = event {
            if sample.is_alert && !self.alert_seen {
                tracing::debug!("first alert observed at {}", sample.sample.iso_timestamp());
                self.alert_seen = true;
            }
        }
    }

    /// Returns `true` once an alert has been observed.
    pub fn alert_seen(&self) -> bool {
        self.alert_seen
    }

    /// Consumes the outcome into a verdict.
    pub fn verdict(self) -> TestVerdict {
        if self.alert_seen {
            TestVerdict::Pass
        } else {
            TestVerdict::Fail
        }
    }
}

/// A finished self-test: verdict plus the loop's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct TestRun {
    pub verdict: TestVerdict,
    pub report: LoopReport,
}

/// Runs the bounded self-test loop.
#[derive(Debug, Clone, Copy)]
pub struct TestValidator {
    poll_loop: PollLoop,
}

impl TestValidator {
    /// Wraps `poll_loop`, limiting it to [`TEST_MAX_PERIODS`] periods.
    pub fn new(poll_loop: PollLoop) -> Self {
        Self {
            poll_loop: poll_loop.bounded(TEST_MAX_PERIODS),
        }
    }

    /// Returns the bounded loop the test runs.
    pub fn poll_loop(&self) -> &PollLoop {
        &self.poll_loop
    }

    /// Writes the forced low threshold. A failed write aborts the test.
    pub fn arm(gateway: &ConfigGateway) -> Result<(), MonitorError> {
        gateway.apply(Attribute::Threshold, TEST_THRESHOLD_MILLI_C)?;
        Ok(())
    }

    /// Runs the bounded loop and judges whether an alert was seen.
    ///
    /// Events are forwarded to `on_event` unchanged.
    pub fn run<R, D, F>(
        &self,
        readiness: &mut R,
        descriptor: R::Descriptor,
        device: &mut D,
        mut on_event: F,
    ) -> Result<TestRun, MonitorError>
    where
        R: Readiness,
        D: Read,
        F: FnMut(&LoopEvent),
    {
        let mut outcome = TestOutcome::new();
        let report = self.poll_loop.run(readiness, descriptor, device, |event| {
            outcome.observe(event);
            on_event(event);
        })?;
        let verdict = outcome.verdict();
        tracing::info!("self-test {verdict:?}: {}", report.summary());
        Ok(TestRun { verdict, report })
    }
}

/// Arms the gateway and runs the self-test in one step.
pub fn run_test<R, D, F>(
    gateway: &ConfigGateway,
    poll_loop: &PollLoop,
    readiness: &mut R,
    descriptor: R::Descriptor,
    device: &mut D,
    on_event: F,
) -> Result<TestRun, MonitorError>
where
    R: Readiness,
    D: Read,
    F: FnMut(&LoopEvent),
{
    TestValidator::arm(gateway)?;
    TestValidator::new(*poll_loop).run(readiness, descriptor, device, on_event)
}
