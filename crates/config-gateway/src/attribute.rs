// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integer-valued device attributes.

/// A writable integer attribute under the device's sysfs directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Sampling period in milliseconds.
    SamplingMs,
    /// Alert threshold in milli-°C.
    Threshold,
}

impl Attribute {
    /// Returns the attribute's file name.
    pub fn file_name(self) -> &'static str {
        match self {
            Attribute::SamplingMs => "sampling_ms",
            Attribute::Threshold => "threshold",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}
