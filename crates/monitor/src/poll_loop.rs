// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The readiness-driven sample loop.
//!
//! ```text
//!            ┌──────────── events ─────────────┐
//!            │                                 ▼
//!        Waiting ── timeout ──► Idle       Draining
//!            ▲                   │             │
//!            └──── limit not ────┴─────────────┘
//!                  reached            │
//!                                     ▼ (bounded mode, limit reached)
//!                                  Terminal
//! ```
//!
//! Each ready event gets exactly one read of [`SAMPLE_SIZE`] bytes:
//! - `EAGAIN` → spurious wake, skipped.
//! - any other error → fatal, the loop returns [`MonitorError::Read`].
//! - a count other than 12 → short read, logged and skipped.
//! - a full record → decoded, classified from the event's priority flag, emitted.
//!
//! Only a cycle that drained events counts as a period. A timeout cycle
//! checks the limit without advancing it. In bounded mode the loop stops
//! once the period limit is reached; unbounded mode runs until a fatal error.

use crate::{LoopReport, MonitorError, ReadyEvent, ReadyFlags, Readiness};
use sample_codec::{decode, ClassifiedSample, SAMPLE_SIZE};
use std::io::{self, Read};
use std::time::Duration;

/// Multiplier applied to the sampling period to size the wait timeout, as a ratio (1.2).
const TIMEOUT_FACTOR_NUM: u64 = 6;
const TIMEOUT_FACTOR_DEN: u64 = 5;

/// Readiness conditions watched on the device: new sample and alert.
const DEVICE_INTEREST: ReadyFlags = ReadyFlags {
    readable: true,
    priority: true,
};

/// Returns the wait timeout for a sampling period: 1.2 × `period_ms`, truncated to whole ms.
pub fn timeout_for_period(period_ms: u32) -> Duration {
    Duration::from_millis(u64::from(period_ms) * TIMEOUT_FACTOR_NUM / TIMEOUT_FACTOR_DEN)
}

/// Whether the loop stops on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Run until a fatal error or external termination.
    Unbounded,
    /// Stop after `max_periods` drained cycles (a zero limit stops after the first cycle).
    Bounded { max_periods: u32 },
}

/// Something the loop reports to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    /// A decoded and classified sample.
    Sample(ClassifiedSample),
    /// A wait-cycle ended without any event.
    Timeout,
}

enum LoopState {
    Waiting,
    Draining(Vec<ReadyEvent>),
    Idle,
    Terminal,
}

/// Configuration of one poll loop run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollLoop {
    timeout: Duration,
    mode: LoopMode,
}

impl PollLoop {
    /// Creates an unbounded loop with the given wait timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            mode: LoopMode::Unbounded,
        }
    }

    /// Creates an unbounded loop sized for a sampling period.
    pub fn for_period(period_ms: u32) -> Self {
        Self::new(timeout_for_period(period_ms))
    }

    /// Returns a copy of this loop limited to `max_periods` drained cycles.
    pub fn bounded(self, max_periods: u32) -> Self {
        Self {
            mode: LoopMode::Bounded { max_periods },
            ..self
        }
    }

    /// Returns the wait timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the termination mode.
    pub fn mode(&self) -> LoopMode {
        self.mode
    }

    /// Registers `descriptor` for readable + priority readiness and runs the loop.
    ///
    /// `device` must read from the same descriptor. `on_event` receives every
    /// sample and timeout in order of occurrence.
    pub fn run<R, D, F>(
        &self,
        readiness: &mut R,
        descriptor: R::Descriptor,
        device: &mut D,
        mut on_event: F,
    ) -> Result<LoopReport, MonitorError>
    where
        R: Readiness,
        D: Read,
        F: FnMut(&LoopEvent),
    {
        let token = readiness.register(descriptor, DEVICE_INTEREST);
        let mut report = LoopReport::default();
        let mut state = LoopState::Waiting;

        tracing::debug!(
            "poll loop started: timeout {} ms, {:?}",
            self.timeout.as_millis(),
            self.mode
        );

        loop {
            state = match state {
                LoopState::Waiting => {
                    let events = readiness.wait(self.timeout).map_err(MonitorError::Poll)?;
                    if events.is_empty() {
                        LoopState::Idle
                    } else {
                        LoopState::Draining(events)
                    }
                }
                LoopState::Idle => {
                    report.timeouts += 1;
                    tracing::debug!("no events within {} ms", self.timeout.as_millis());
                    on_event(&LoopEvent::Timeout);
                    self.next_state(&report)
                }
                LoopState::Draining(events) => {
                    for event in events.iter().filter(|e| e.token == token) {
                        drain_one(event.flags, device, &mut report, &mut on_event)?;
                    }
                    self.complete_period(&mut report)
                }
                LoopState::Terminal => break,
            };
        }

        tracing::debug!("poll loop finished: {}", report.summary());
        Ok(report)
    }

    fn complete_period(&self, report: &mut LoopReport) -> LoopState {
        report.periods = report.periods.saturating_add(1);
        self.next_state(report)
    }

    fn next_state(&self, report: &LoopReport) -> LoopState {
        match self.mode {
            LoopMode::Bounded { max_periods } if report.periods >= max_periods => {
                LoopState::Terminal
            }
            _ => LoopState::Waiting,
        }
    }
}

/// Performs the single read owed to one ready event.
fn drain_one<D, F>(
    flags: ReadyFlags,
    device: &mut D,
    report: &mut LoopReport,
    on_event: &mut F,
) -> Result<(), MonitorError>
where
    D: Read,
    F: FnMut(&LoopEvent),
{
    let mut buf = [0u8; SAMPLE_SIZE];
    let n = match device.read(&mut buf) {
        Ok(n) => n,
        Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => {
            report.spurious_wakes += 1;
            tracing::trace!("spurious wake-up ({flags:?}), nothing to read");
            return Ok(());
        }
        Err(e) => return Err(MonitorError::Read(e)),
    };

    match decode(&buf[..n]) {
        Ok(sample) => {
            let classified = ClassifiedSample::new(sample, flags.priority);
            report.record_sample(classified.is_alert);
            on_event(&LoopEvent::Sample(classified));
        }
        Err(e) => {
            report.short_reads += 1;
            tracing::warn!("read: {e}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{ScriptedDevice, ScriptedReadiness};
    use sample_codec::{encode, Sample};

    const R: ReadyFlags = ReadyFlags::READABLE;
    const A: ReadyFlags = ReadyFlags::ALERT;

    fn record(ts: i64, temp: i32) -> [u8; SAMPLE_SIZE] {
        encode(&Sample::new(ts, temp))
    }

    /// Runs the loop and collects every emitted event.
    fn collect(
        poll_loop: PollLoop,
        readiness: &mut ScriptedReadiness,
        device: &mut ScriptedDevice,
    ) -> (Result<LoopReport, MonitorError>, Vec<LoopEvent>) {
        let mut events = Vec::new();
        let result = poll_loop.run(readiness, (), device, |e| events.push(*e));
        (result, events)
    }

    fn samples(events: &[LoopEvent]) -> Vec<ClassifiedSample> {
        events
            .iter()
            .filter_map(|e| match e {
                LoopEvent::Sample(s) => Some(*s),
                LoopEvent::Timeout => None,
            })
            .collect()
    }

    #[test]
    fn test_timeout_sizing() {
        assert_eq!(timeout_for_period(1000), Duration::from_millis(1200));
        assert_eq!(timeout_for_period(100), Duration::from_millis(120));
        assert_eq!(timeout_for_period(333), Duration::from_millis(399));
        assert_eq!(timeout_for_period(10), Duration::from_millis(12));
    }

    #[test]
    fn test_builder() {
        let l = PollLoop::for_period(500);
        assert_eq!(l.timeout(), Duration::from_millis(600));
        assert_eq!(l.mode(), LoopMode::Unbounded);
        assert_eq!(l.bounded(2).mode(), LoopMode::Bounded { max_periods: 2 });
        assert_eq!(l.bounded(2).timeout(), l.timeout());
    }

    #[test]
    fn test_registers_readable_and_priority() {
        let mut readiness = ScriptedReadiness::new().events(&[R]);
        let mut device = ScriptedDevice::new();
        let (result, _) = collect(PollLoop::for_period(100).bounded(1), &mut readiness, &mut device);
        result.unwrap();
        assert_eq!(readiness.interest, Some(DEVICE_INTEREST));
        assert_eq!(readiness.timeouts_seen, vec![Duration::from_millis(120)]);
    }

    #[test]
    fn test_alert_comes_from_event_not_payload() {
        let payload = record(1_700_000_000_000_000_000, 31_500);
        let mut readiness = ScriptedReadiness::new().events(&[R]).events(&[A]);
        let mut device = ScriptedDevice::new().bytes(&payload).bytes(&payload);

        let (result, events) = collect(PollLoop::for_period(100).bounded(2), &mut readiness, &mut device);
        let report = result.unwrap();

        let got = samples(&events);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].sample, got[1].sample);
        assert!(!got[0].is_alert);
        assert!(got[1].is_alert);
        assert_eq!(report.alerts, 1);
    }

    #[test]
    fn test_bounded_stops_after_limit_regardless_of_burst_size() {
        let burst = [R, A, R, R, R];
        let mut readiness = ScriptedReadiness::new()
            .events(&burst)
            .events(&burst)
            .events(&burst);
        let mut device = ScriptedDevice::new();
        for i in 0..15 {
            device = device.bytes(&record(i, 20_000));
        }

        let (result, events) = collect(PollLoop::for_period(100).bounded(2), &mut readiness, &mut device);
        let report = result.unwrap();

        assert_eq!(readiness.waits, 2);
        assert_eq!(report.periods, 2);
        assert_eq!(report.samples, 10);
        assert_eq!(samples(&events).len(), 10);
    }

    #[test]
    fn test_timeouts_do_not_consume_periods() {
        let mut readiness = ScriptedReadiness::new()
            .timeout()
            .timeout()
            .events(&[R])
            .timeout()
            .events(&[A]);
        let mut device = ScriptedDevice::new()
            .bytes(&record(1, 20_000))
            .bytes(&record(2, 26_000));

        let (result, events) = collect(PollLoop::for_period(100).bounded(2), &mut readiness, &mut device);
        let report = result.unwrap();

        assert_eq!(
            events,
            vec![
                LoopEvent::Timeout,
                LoopEvent::Timeout,
                LoopEvent::Sample(ClassifiedSample::new(Sample::new(1, 20_000), false)),
                LoopEvent::Timeout,
                LoopEvent::Sample(ClassifiedSample::new(Sample::new(2, 26_000), true)),
            ]
        );
        assert_eq!(report.periods, 2);
        assert_eq!(report.timeouts, 3);
        assert_eq!(readiness.waits, 5);
    }

    #[test]
    fn test_timeout_after_limit_reached_terminates() {
        // A zero limit is already reached before the first wait.
        let mut readiness = ScriptedReadiness::new().timeout().events(&[R]);
        let mut device = ScriptedDevice::new();

        let (result, events) = collect(PollLoop::for_period(100).bounded(0), &mut readiness, &mut device);
        let report = result.unwrap();

        assert_eq!(events, vec![LoopEvent::Timeout]);
        assert_eq!(report.periods, 0);
        assert_eq!(readiness.waits, 1);
        assert_eq!(device.read_calls, 0);
    }

    #[test]
    fn test_short_read_is_skipped() {
        let mut readiness = ScriptedReadiness::new().events(&[R]).events(&[R]);
        let mut device = ScriptedDevice::new()
            .bytes(&[0xAA; 7])
            .bytes(&record(5, 22_000));

        let (result, events) = collect(PollLoop::for_period(100).bounded(2), &mut readiness, &mut device);
        let report = result.unwrap();

        assert_eq!(report.short_reads, 1);
        assert_eq!(
            samples(&events),
            vec![ClassifiedSample::new(Sample::new(5, 22_000), false)]
        );
    }

    #[test]
    fn test_end_of_file_is_a_short_read() {
        let mut readiness = ScriptedReadiness::new().events(&[R]);
        let mut device = ScriptedDevice::new().bytes(&[]);

        let (result, events) = collect(PollLoop::for_period(100).bounded(1), &mut readiness, &mut device);
        assert_eq!(result.unwrap().short_reads, 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_would_block_is_skipped() {
        let mut readiness = ScriptedReadiness::new().events(&[R, A]);
        let mut device = ScriptedDevice::new()
            .error(io::ErrorKind::WouldBlock)
            .bytes(&record(9, 40_000));

        let (result, events) = collect(PollLoop::for_period(100).bounded(1), &mut readiness, &mut device);
        let report = result.unwrap();

        assert_eq!(report.spurious_wakes, 1);
        assert_eq!(
            samples(&events),
            vec![ClassifiedSample::new(Sample::new(9, 40_000), true)]
        );
    }

    #[test]
    fn test_read_error_is_fatal() {
        let mut readiness = ScriptedReadiness::new().events(&[R, R]);
        let mut device = ScriptedDevice::new()
            .error(io::ErrorKind::BrokenPipe)
            .bytes(&record(1, 1));

        let (result, events) = collect(PollLoop::for_period(100), &mut readiness, &mut device);

        assert!(matches!(result, Err(MonitorError::Read(ref e)) if e.kind() == io::ErrorKind::BrokenPipe));
        assert!(events.is_empty());
        assert_eq!(device.read_calls, 1);
    }

    #[test]
    fn test_unbounded_survives_timeouts_and_transients() {
        let mut readiness = ScriptedReadiness::new()
            .timeout()
            .events(&[R])
            .timeout()
            .events(&[R])
            .events(&[A])
            .events(&[R]);
        let mut device = ScriptedDevice::new()
            .bytes(&[1, 2, 3])
            .error(io::ErrorKind::WouldBlock)
            .bytes(&record(7, 50_000))
            .error(io::ErrorKind::Other);

        let (result, events) = collect(PollLoop::for_period(100), &mut readiness, &mut device);

        assert!(matches!(result, Err(MonitorError::Read(_))));
        assert_eq!(
            events,
            vec![
                LoopEvent::Timeout,
                LoopEvent::Timeout,
                LoopEvent::Sample(ClassifiedSample::new(Sample::new(7, 50_000), true)),
            ]
        );
        assert_eq!(readiness.waits, 6);
    }

    #[test]
    fn test_wait_failure_is_fatal() {
        let mut readiness = ScriptedReadiness::new().failure(io::ErrorKind::InvalidInput);
        let mut device = ScriptedDevice::new();

        let (result, _) = collect(PollLoop::for_period(100).bounded(2), &mut readiness, &mut device);
        assert!(matches!(result, Err(MonitorError::Poll(_))));
    }

    #[test]
    fn test_zero_limit_still_runs_one_cycle() {
        let mut readiness = ScriptedReadiness::new().events(&[R]).events(&[R]);
        let mut device = ScriptedDevice::new().bytes(&record(1, 1)).bytes(&record(2, 2));
        let (result, _) = collect(PollLoop::for_period(100).bounded(0), &mut readiness, &mut device);
        assert_eq!(result.unwrap().periods, 1);
        assert_eq!(readiness.waits, 1);
    }
}
