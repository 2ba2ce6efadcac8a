// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `simtemp` (default): apply settings, then monitor or self-test.

use super::output::{self, Format};
use super::{EXIT_SUCCESS, EXIT_TEST_FAILED};
use monitor::{MonitorConfig, Session, SessionOutcome, TestVerdict};

/// Runs the session and returns the process exit status.
pub fn execute(config: MonitorConfig, format: Format) -> anyhow::Result<u8> {
    let session = Session::new(config);

    session.configure(|applied| {
        if format == Format::Text {
            println!("{}", output::render_applied(applied));
        }
    })?;

    let outcome = session.run(|event| println!("{}", output::render_event(event, format)))?;

    match outcome {
        SessionOutcome::Completed(report) => {
            tracing::info!("{}", report.summary());
            Ok(EXIT_SUCCESS)
        }
        SessionOutcome::Test(run) => {
            let line = output::render_verdict(&run, format);
            match run.verdict {
                TestVerdict::Pass => {
                    println!("{line}");
                    Ok(EXIT_SUCCESS)
                }
                TestVerdict::Fail => {
                    eprintln!("{line}");
                    Ok(EXIT_TEST_FAILED)
                }
            }
        }
    }
}
