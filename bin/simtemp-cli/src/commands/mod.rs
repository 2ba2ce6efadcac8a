// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CLI command implementations.

pub mod output;
pub mod run;
pub mod stats;

use tracing_subscriber::EnvFilter;

/// Exit status for a completed run or a passed self-test.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status for configuration, open, and read failures.
pub const EXIT_FAILURE: u8 = 1;

/// Exit status for a self-test that saw no alert.
pub const EXIT_TEST_FAILED: u8 = 2;

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over the `-v` count.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
