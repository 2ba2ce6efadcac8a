// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Rendering of loop events, configuration echoes, and self-test verdicts.

use config_gateway::Attribute;
use monitor::{Applied, LoopEvent, TestRun, TestVerdict, TEST_MAX_PERIODS};
use serde_json::json;

/// Output flavour selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `2025-01-01T00:00:00.000Z temp=45.25C alert=1`
    Text,
    /// One JSON object per line.
    Json,
}

/// Renders one loop event as a single output line.
pub fn render_event(event: &LoopEvent, format: Format) -> String {
    match (event, format) {
        (LoopEvent::Sample(s), Format::Text) => format!(
            "{} temp={:.2}C alert={}",
            s.sample.iso_timestamp(),
            s.sample.celsius(),
            u8::from(s.is_alert)
        ),
        (LoopEvent::Timeout, Format::Text) => "[poll] timeout".to_string(),
        (LoopEvent::Sample(s), Format::Json) => json!({
            "event": "sample",
            "timestamp": s.sample.iso_timestamp(),
            "timestamp_ns": s.sample.timestamp_ns,
            "temperature_milli_c": s.sample.temperature_milli_c,
            "temperature_c": s.sample.celsius(),
            "alert": s.is_alert,
        })
        .to_string(),
        (LoopEvent::Timeout, Format::Json) => json!({ "event": "timeout" }).to_string(),
    }
}

/// Renders the self-test verdict line.
pub fn render_verdict(run: &TestRun, format: Format) -> String {
    match (run.verdict, format) {
        (TestVerdict::Pass, Format::Text) => "[TEST] OK: alert detected".to_string(),
        (TestVerdict::Fail, Format::Text) => {
            format!("[TEST] : no alert detected within {TEST_MAX_PERIODS} periods")
        }
        (_, Format::Json) => json!({
            "event": "test",
            "verdict": run.verdict,
            "report": run.report,
        })
        .to_string(),
    }
}

/// Renders the confirmation printed after a successful write.
pub fn render_applied(applied: &Applied) -> String {
    match applied {
        Applied::Setting {
            attribute: Attribute::SamplingMs,
            value,
            path,
        } => format!("Wrote sampling_ms={value} to {}", path.display()),
        Applied::Setting {
            attribute: Attribute::Threshold,
            value,
            path,
        } => format!("Wrote threshold={value} to {}", path.display()),
        Applied::Mode { mode, path } => format!("Wrote mode={mode} to {}", path.display()),
        Applied::TestThreshold { value, path } => format!(
            "[TEST] wrote threshold={:.1} °C to {}",
            f64::from(*value) / 1000.0,
            path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_gateway::SimMode;
    use monitor::LoopReport;
    use sample_codec::{ClassifiedSample, Sample};
    use std::path::PathBuf;

    fn event(temp: i32, alert: bool) -> LoopEvent {
        LoopEvent::Sample(ClassifiedSample::new(
            Sample::new(1_700_000_000_123_456_789, temp),
            alert,
        ))
    }

    #[test]
    fn test_text_sample() {
        assert_eq!(
            render_event(&event(45_250, true), Format::Text),
            "2023-11-14T22:13:20.123Z temp=45.25C alert=1"
        );
        assert_eq!(
            render_event(&event(-1_250, false), Format::Text),
            "2023-11-14T22:13:20.123Z temp=-1.25C alert=0"
        );
    }

    #[test]
    fn test_text_timeout() {
        assert_eq!(render_event(&LoopEvent::Timeout, Format::Text), "[poll] timeout");
    }

    #[test]
    fn test_json_sample() {
        let line = render_event(&event(24_500, true), Format::Json);
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(v["event"], "sample");
        assert_eq!(v["timestamp"], "2023-11-14T22:13:20.123Z");
        assert_eq!(v["temperature_milli_c"], 24_500);
        assert_eq!(v["alert"], true);
    }

    #[test]
    fn test_json_timeout() {
        assert_eq!(
            render_event(&LoopEvent::Timeout, Format::Json),
            r#"{"event":"timeout"}"#
        );
    }

    #[test]
    fn test_verdict_lines() {
        let report = LoopReport {
            periods: 2,
            samples: 2,
            alerts: 1,
            ..Default::default()
        };
        let pass = TestRun {
            verdict: TestVerdict::Pass,
            report,
        };
        let fail = TestRun {
            verdict: TestVerdict::Fail,
            report: LoopReport::default(),
        };

        assert_eq!(render_verdict(&pass, Format::Text), "[TEST] OK: alert detected");
        assert_eq!(
            render_verdict(&fail, Format::Text),
            "[TEST] : no alert detected within 2 periods"
        );

        let v: serde_json::Value =
            serde_json::from_str(&render_verdict(&pass, Format::Json)).unwrap();
        assert_eq!(v["event"], "test");
        assert_eq!(v["verdict"], "pass");
        assert_eq!(v["report"]["periods"], 2);
        assert_eq!(v["report"]["alerts"], 1);
        let v: serde_json::Value =
            serde_json::from_str(&render_verdict(&fail, Format::Json)).unwrap();
        assert_eq!(v["verdict"], "fail");
    }

    #[test]
    fn test_applied_lines() {
        let path = PathBuf::from("/sys/class/simtemp_class/simtemp/threshold");
        assert_eq!(
            render_applied(&Applied::Setting {
                attribute: Attribute::Threshold,
                value: 45_000,
                path: path.clone(),
            }),
            "Wrote threshold=45000 to /sys/class/simtemp_class/simtemp/threshold"
        );
        assert_eq!(
            render_applied(&Applied::TestThreshold {
                value: 24_000,
                path,
            }),
            "[TEST] wrote threshold=24.0 °C to /sys/class/simtemp_class/simtemp/threshold"
        );
        assert_eq!(
            render_applied(&Applied::Mode {
                mode: SimMode::Ramp,
                path: PathBuf::from("/s/mode"),
            }),
            "Wrote mode=ramp to /s/mode"
        );
    }
}
