// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `simtemp --stats`: apply settings, then print the driver's counters.

use super::output::{self, Format};
use super::EXIT_SUCCESS;
use monitor::{MonitorConfig, Session};

/// Prints the driver counters and returns the process exit status.
pub fn execute(config: MonitorConfig, format: Format) -> anyhow::Result<u8> {
    let session = Session::new(config);

    session.configure(|applied| {
        if format == Format::Text {
            println!("{}", output::render_applied(applied));
        }
    })?;

    let stats = session.gateway().read_stats()?;

    match format {
        Format::Json => println!("{}", serde_json::to_string(&stats)?),
        Format::Text => {
            println!("  Driver statistics ({})", session.gateway().stats_path().display());
            println!("   Updates:      {}", stats.updates);
            println!("   Alerts:       {}", stats.alerts);
            println!(
                "   Last temp:    {:.2} C",
                f64::from(stats.last_temp_milli_c) / 1000.0
            );
            println!(
                "   Threshold:    {:.2} C",
                f64::from(stats.threshold_milli_c) / 1000.0
            );
            if let Ok(mode) = session.gateway().read_mode() {
                println!("   Mode:         {mode}");
            }
        }
    }

    tracing::info!("{}", stats.summary());
    Ok(EXIT_SUCCESS)
}
