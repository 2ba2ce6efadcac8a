// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-session counters collected by the poll loop.

/// What happened during one run of the poll loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoopReport {
    /// Wait-cycles that drained at least one event.
    pub periods: u32,
    /// Samples decoded and emitted.
    pub samples: u64,
    /// Emitted samples classified as alerts.
    pub alerts: u64,
    /// Wait-cycles that ended without any event.
    pub timeouts: u64,
    /// Reads that returned something other than one full record.
    pub short_reads: u64,
    /// Ready events whose read returned `EAGAIN`.
    pub spurious_wakes: u64,
}

impl LoopReport {
    /// Returns `true` if at least one alert sample was emitted.
    pub fn alert_seen(&self) -> bool {
        self.alerts > 0
    }

    pub(crate) fn record_sample(&mut self, is_alert: bool) {
        self.samples += 1;
        if is_alert {
            self.alerts += 1;
        }
    }

    /// Returns a one-line summary for logging.
    ///
    /// # Example output
    /// ```text
    /// 2 periods: 2 samples (1 alerts), 0 timeouts, 0 short reads, 0 spurious wakes
    /// ```
    pub fn summary(&self) -> String {
        format!(
            "{} periods: {} samples ({} alerts), {} timeouts, {} short reads, {} spurious wakes",
            self.periods,
            self.samples,
            self.alerts,
            self.timeouts,
            self.short_reads,
            self.spurious_wakes,
        )
    }
}
