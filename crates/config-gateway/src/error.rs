// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for sysfs attribute access.

/// Errors that can occur when reading or writing device attributes.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Writing a value to an attribute failed. Always fatal to the caller.
    #[error("failed to write {value} to {path}: {source}")]
    Write {
        path: String,
        value: String,
        source: std::io::Error,
    },

    /// Failed to read an attribute file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// The attribute content could not be parsed.
    #[error("failed to parse value from {path}: {detail}")]
    Parse { path: String, detail: String },

    /// The attribute path does not exist (driver not loaded?).
    #[error("sysfs path not found: {path} (is the simtemp driver loaded?)")]
    NotAvailable { path: String },
}
