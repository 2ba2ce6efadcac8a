// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the monitoring session.

/// Errors that end a monitoring session.
///
/// Short reads and spurious wake-ups are absorbed inside the poll loop and
/// never surface here.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// A sysfs write failed, so the requested configuration did not take effect.
    #[error(transparent)]
    Gateway(#[from] config_gateway::GatewayError),

    /// The character device could not be opened.
    #[error("failed to open {path}: {source}")]
    DeviceOpen {
        path: String,
        source: std::io::Error,
    },

    /// A device read failed with something other than `EAGAIN`.
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),

    /// The readiness wait itself failed.
    #[error("readiness wait failed: {0}")]
    Poll(#[source] std::io::Error),

    /// Configuration file error.
    #[error("configuration error: {0}")]
    Config(String),
}
