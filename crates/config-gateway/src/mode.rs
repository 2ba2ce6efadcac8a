// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Simulation profiles accepted by the `mode` attribute.

use std::str::FromStr;

/// How the simulated sensor evolves its temperature between samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimMode {
    /// Small jitter around the current value (±50 m°C).
    Normal,
    /// Larger jitter (±1 °C).
    Noisy,
    /// Rises 0.5 °C per sample, wrapping from 100 °C back to -40 °C.
    Ramp,
}

impl SimMode {
    /// Returns the keyword written to (and read from) the attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            SimMode::Normal => "normal",
            SimMode::Noisy => "noisy",
            SimMode::Ramp => "ramp",
        }
    }
}

impl std::fmt::Display for SimMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(SimMode::Normal),
            "noisy" => Ok(SimMode::Noisy),
            "ramp" => Ok(SimMode::Ramp),
            other => Err(format!(
                "unknown mode '{other}'; expected 'normal', 'noisy', or 'ramp'"
            )),
        }
    }
}
