// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # simtemp
//!
//! Command-line monitor for the `simtemp` simulated temperature sensor.
//!
//! ## Usage
//! ```bash
//! # Monitor continuously with the current driver settings
//! simtemp
//!
//! # Configure, then monitor
//! simtemp --sampling 500 --threshold 45000 --mode noisy
//!
//! # Self-test: force a 24 °C threshold and expect an alert within 2 periods
//! simtemp --test
//!
//! # Print driver statistics
//! simtemp --stats
//! ```
//!
//! ## Exit codes
//! - `0` success, or self-test passed
//! - `1` configuration write, device open, or device read failure
//! - `2` self-test finished without observing an alert

mod commands;

use clap::Parser;
use config_gateway::SimMode;
use monitor::MonitorConfig;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "simtemp",
    about = "Configure and monitor the simtemp temperature sensor",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (command-line flags take precedence).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Alert threshold in milli-Celsius (e.g. 45000).
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<i32>,

    /// Sampling period in milliseconds (e.g. 1000).
    #[arg(long, allow_negative_numbers = true)]
    sampling: Option<i32>,

    /// Simulation profile: normal, noisy, ramp.
    #[arg(long)]
    mode: Option<SimMode>,

    /// Self-test: set a low threshold and expect an alert within 2 periods.
    #[arg(long)]
    test: bool,

    /// Device path [default: /dev/simtemp].
    #[arg(long)]
    device: Option<PathBuf>,

    /// Sysfs attribute directory [default: /sys/class/simtemp_class/simtemp].
    #[arg(long)]
    sysfs: Option<PathBuf>,

    /// Print driver statistics after applying settings, then exit.
    #[arg(long)]
    stats: bool,

    /// Emit one JSON object per line instead of text.
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Layers command-line flags over the configuration file (if any).
    fn monitor_config(&self) -> anyhow::Result<MonitorConfig> {
        let mut config = match &self.config {
            Some(path) => MonitorConfig::from_file(path)?,
            None => MonitorConfig::default(),
        };
        if let Some(device) = &self.device {
            config.device_path = device.clone();
        }
        if let Some(sysfs) = &self.sysfs {
            config.sysfs_path = sysfs.clone();
        }
        if self.sampling.is_some() {
            config.sampling_ms = self.sampling;
        }
        if self.threshold.is_some() {
            config.threshold_milli_c = self.threshold;
        }
        if self.mode.is_some() {
            config.mode = self.mode;
        }
        config.test |= self.test;
        Ok(config)
    }

    /// Runs the selected command and returns the process exit status.
    fn execute(&self) -> u8 {
        let format = if self.json {
            commands::output::Format::Json
        } else {
            commands::output::Format::Text
        };

        let result = self.monitor_config().and_then(|config| {
            if self.stats {
                commands::stats::execute(config, format)
            } else {
                commands::run::execute(config, format)
            }
        });

        match result {
            Ok(status) => status,
            Err(e) => {
                eprintln!("ERROR: {e:#}");
                commands::EXIT_FAILURE
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    ExitCode::from(cli.execute())
}
